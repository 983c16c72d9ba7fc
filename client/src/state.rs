//! Application-wide state: who is signed in, their tier, their coins.
//!
//! One [`Store`] owns the [`AppState`]. Everything else reads snapshots or
//! subscribes to changes, and writes only by dispatching an [`Action`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::{Account, Profile, SubscriptionTier};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub profile: Option<Profile>,
    pub tier: SubscriptionTier,
    /// As reported by the backend. Display only.
    pub coins: u64,
}

impl AppState {
    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.profile.as_ref().map_or("", |p| p.display_name.as_str())
    }

    /// Pure reducer.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SignedIn { profile, tier, coins } => {
                self.profile = Some(profile);
                self.tier = tier;
                self.coins = coins;
            }
            Action::ProfileUpdated(profile) => self.profile = Some(profile),
            Action::TierChanged(tier) => self.tier = tier,
            Action::BalanceUpdated(coins) => self.coins = coins,
            Action::SignedOut => *self = AppState::default(),
        }
    }
}

/// The only way to change [`AppState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    SignedIn { profile: Profile, tier: SubscriptionTier, coins: u64 },
    ProfileUpdated(Profile),
    TierChanged(SubscriptionTier),
    BalanceUpdated(u64),
    SignedOut,
}

impl From<Account> for Action {
    fn from(account: Account) -> Self {
        Action::SignedIn { profile: account.profile, tier: account.tier, coins: account.coins }
    }
}

/// Owner of [`AppState`]. Clones share it.
#[derive(Debug, Clone)]
pub struct Store {
    sender: Arc<watch::Sender<AppState>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender: Arc::new(sender) }
    }

    pub fn dispatch(&self, action: Action) {
        log::debug!("dispatch {:?}", action);
        self.sender.send_modify(|state| state.apply(action));
    }

    pub fn snapshot(&self) -> AppState {
        self.sender.borrow().clone()
    }

    /// Receives every state change after subscribing.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.sender.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_signs_in() {
        let store = Store::default();
        let account = Account { profile: profile(), tier: SubscriptionTier::Pro, coins: 250 };

        store.dispatch(account.into());

        let state = store.snapshot();
        assert_eq!(state.display_name(), "Ночные Снайперы");
        assert_eq!(state.tier, SubscriptionTier::Pro);
        assert_eq!(state.coins, 250);
    }

    fn profile() -> Profile {
        Profile {
            id: "u-1".into(),
            display_name: "Ночные Снайперы".into(),
            email: "band@example.com".into(),
            avatar: None,
            city: "Москва".into(),
            genres: vec!["rock".into()],
        }
    }

    #[test]
    fn test_reducer() {
        let mut state = AppState::default();
        assert!(!state.is_signed_in());

        state.apply(Action::SignedIn { profile: profile(), tier: SubscriptionTier::Pro, coins: 1200 });
        assert_eq!(state.display_name(), "Ночные Снайперы");
        assert!(state.tier.includes_promotion());

        state.apply(Action::BalanceUpdated(900));
        assert_eq!(state.coins, 900);

        state.apply(Action::SignedOut);
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_store_notifies_subscribers() {
        let store = Store::default();
        let mut rx = store.subscribe();
        let handle = store.clone();

        handle.dispatch(Action::TierChanged(SubscriptionTier::Premium));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().tier, SubscriptionTier::Premium);
        assert_eq!(store.snapshot().tier, SubscriptionTier::Premium);
    }

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_string(&Action::BalanceUpdated(5)).unwrap();
        assert_eq!(json, r#"{"type":"balanceUpdated","payload":5}"#);
    }
}
