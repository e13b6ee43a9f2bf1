//! The end-to-end chat-event flows.

use crate::config::AppConfig;
use crate::messages::render_status;
use crate::routing::{classify, ChatCommand};
use muster_common::{normalized, ChatEvent, Notifier, PlayerId, Roster};
use muster_tracker::{ConfirmOutcome, CooldownDecision, CooldownRegistry, RequestTracker};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Routes chat events through the roster, the tracker and the notifier.
///
/// One instance serves all teams; per-team serialization lives inside the
/// tracker. Every flow here is: gate, mutate/query the tracker, then do all
/// messaging with the data the tracker returned — no notifier call ever
/// holds a tracker lock.
pub struct Dispatcher {
    config: AppConfig,
    tracker: RequestTracker,
    cooldowns: CooldownRegistry,
    roster: Arc<dyn Roster>,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(config: AppConfig, roster: Arc<dyn Roster>, notifier: Arc<dyn Notifier>) -> Self {
        info!(
            language = ?config.language,
            quota = config.quota,
            categories = config.categories.len(),
            cooldown_secs = config.cooldown_secs,
            "Initializing dispatcher"
        );

        let tracker = RequestTracker::new(config.tracker_config());
        let cooldowns = CooldownRegistry::new(Duration::from_secs(config.cooldown_secs));

        Self {
            config,
            tracker,
            cooldowns,
            roster,
            notifier,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Process one inbound chat event end-to-end.
    pub async fn handle_event(&self, event: &ChatEvent) {
        if !self.config.server_enabled(event.server.as_deref()) {
            debug!(server = ?event.server, "Event from disabled server, ignoring");
            return;
        }

        match classify(&event.content, &self.config) {
            ChatCommand::RequestSupplies => self.handle_supply_request(&event.player_id).await,
            ChatCommand::Confirm { category } => {
                self.handle_confirmation(&event.player_id, category.as_deref())
                    .await
            }
            ChatCommand::Unrelated => {}
        }
    }

    /// The commander's open-request flow: cooldown, role and team gates,
    /// fulfiller discovery, then open + broadcast.
    async fn handle_supply_request(&self, player: &PlayerId) {
        let lang = self.config.language;

        if let CooldownDecision::Throttled { remaining } = self.cooldowns.try_acquire(player) {
            let secs = remaining.as_secs().max(1);
            self.say(player, &lang.cooldown(secs, &self.config.request_command))
                .await;
            return;
        }

        let profile = self.roster.identify(player).await;
        if profile.role.as_deref() != Some(normalized(&self.config.requester_role).as_str()) {
            self.say(player, &lang.requester_only(&self.config.request_command))
                .await;
            return;
        }

        let Some(team) = profile.team else {
            self.say(player, &lang.team_not_found()).await;
            return;
        };

        let fulfillers = self
            .roster
            .list_fulfillers(&team, &self.config.fulfiller_role)
            .await;
        if fulfillers.is_empty() {
            self.say(player, &lang.no_fulfillers()).await;
            return;
        }

        let receipt = self.tracker.open_request(&team, player, fulfillers.len());

        let broadcast =
            lang.request_broadcast(&self.labels(), &self.config.confirm_command, &self.codes());
        for fulfiller in &fulfillers {
            self.say(fulfiller, &broadcast).await;
        }

        let status = render_status(&receipt.status);
        self.say(player, &lang.request_sent(fulfillers.len(), &status))
            .await;
    }

    /// An engineer's confirm flow: role and team gates, category
    /// validation, then the tracker confirm and the fan-out messaging.
    async fn handle_confirmation(&self, player: &PlayerId, category: Option<&str>) {
        let lang = self.config.language;

        let profile = self.roster.identify(player).await;
        if profile.role.as_deref() != Some(normalized(&self.config.fulfiller_role).as_str()) {
            self.say(player, &lang.fulfiller_only(&self.config.confirm_command))
                .await;
            return;
        }

        let Some(team) = profile.team else {
            self.say(player, &lang.team_not_found()).await;
            return;
        };

        if self.tracker.status(&team).is_none() {
            self.say(player, &lang.no_active_request()).await;
            return;
        }

        let Some(code) = category else {
            self.say(
                player,
                &lang.usage(&self.config.confirm_command, &self.codes(), &self.example_code()),
            )
            .await;
            return;
        };

        let Some(label) = self
            .tracker
            .config()
            .category(code)
            .map(|c| c.label.clone())
        else {
            self.say(
                player,
                &lang.invalid_category(
                    &self.codes(),
                    &self.config.confirm_command,
                    &self.example_code(),
                ),
            )
            .await;
            return;
        };

        match self.tracker.record_confirmation(&team, code, player) {
            // Covers the race where the request completed or was cleared
            // between the precheck above and this call.
            ConfirmOutcome::NoActiveRequest => {
                self.say(player, &lang.no_active_request()).await;
            }
            ConfirmOutcome::AlreadyConfirmed => {
                self.say(player, &lang.already_confirmed(&label)).await;
            }
            ConfirmOutcome::Accepted(receipt) => {
                let status = render_status(&receipt.status);
                self.say(player, &lang.confirmed(&label, &status)).await;
                self.say(&receipt.requester, &lang.progress_update(&label, &status))
                    .await;

                if receipt.completed {
                    self.say(&receipt.requester, &lang.all_confirmed()).await;
                    let fulfillers = self
                        .roster
                        .list_fulfillers(&team, &self.config.fulfiller_role)
                        .await;
                    for fulfiller in &fulfillers {
                        self.say(fulfiller, &lang.mission_complete()).await;
                    }
                }
            }
        }
    }

    async fn say(&self, player: &PlayerId, text: &str) {
        self.notifier.send_to_player(player, text).await;
    }

    /// Category labels joined for the broadcast message.
    fn labels(&self) -> String {
        self.config
            .categories
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Category codes joined for usage hints.
    fn codes(&self) -> String {
        self.config
            .categories
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn example_code(&self) -> String {
        self.config
            .categories
            .first()
            .map(|c| c.code.clone())
            .unwrap_or_default()
    }
}
