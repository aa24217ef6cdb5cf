//! Sequencer — the wheel's state machine
//!
//! Drives one widget through `Idle → Spinning → Revealing → Closed`.
//!
//! ## Timer chain
//!
//! ```text
//! start()
//!   └─ arm Reveal    (spin duration + settle padding)
//!        └─ arm Eliminate (reveal duration)   → host.on_eliminated(name)
//!             └─ arm Close (auto-close delay) → host.on_close()
//! ```
//!
//! Each timer is armed from inside the previous one's handler, so a
//! session's callbacks can only ever arrive in that order. Hiding,
//! dismissing or dropping the sequencer cancels the chain and replaces the
//! whole session bundle with its initial value.
//!
//! Time only moves when the host calls [`Sequencer::advance`] or
//! [`Sequencer::advance_to`].

use serde::{Deserialize, Serialize};

use ew_core::{EwResult, ParticipantList};
use ew_stage::{Refusal, SequenceState, SessionTrace, WheelEvent, WheelStage};

use crate::config::WheelConfig;
use crate::host::WheelHost;
use crate::keyboard::WheelKey;
use crate::random::{RandomSource, RngSource};
use crate::reveal::RevealProgress;
use crate::selector::{SpinOutcome, select_outcome};
use crate::timer::{PendingTimers, TimerKind};

/// Announced when a spin starts
pub const SPIN_ANNOUNCEMENT: &str = "Selection in progress";

/// Announced when the chosen name is revealed
pub fn elimination_announcement(name: &str) -> String {
    format!("{name} has been eliminated")
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything that is reset together when the widget closes
#[derive(Debug, Clone, Default)]
struct SessionState {
    state: SequenceState,
    outcome: Option<SpinOutcome>,
    rotation: f64,
    chosen: Option<String>,
    reveal: Option<RevealProgress>,
    eliminated: bool,
}

impl SessionState {
    fn opened() -> Self {
        Self {
            state: SequenceState::Idle,
            ..Default::default()
        }
    }
}

/// Read-only view for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub state: SequenceState,
    pub visible: bool,
    pub spinning: bool,
    /// Rotation the wheel should be drawn at (degrees)
    pub rotation: f64,
    pub segment_angle: f64,
    pub participant_count: usize,
    pub chosen: Option<String>,
    /// Portion of the chosen name typed so far
    pub revealed_text: String,
    pub reveal_complete: bool,
    pub pending_timers: usize,
    pub now_ms: u64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEQUENCER
// ═══════════════════════════════════════════════════════════════════════════════

/// Wheel state machine bound to a host
pub struct Sequencer<H: WheelHost> {
    config: WheelConfig,
    participants: ParticipantList,
    host: H,
    random: Box<dyn RandomSource>,
    session: SessionState,
    timers: PendingTimers,
    trace: SessionTrace,
    now_ms: u64,
    spins: u64,
}

impl<H: WheelHost> Sequencer<H> {
    /// Create a hidden sequencer
    pub fn new(
        config: WheelConfig,
        participants: ParticipantList,
        host: H,
        random: Box<dyn RandomSource>,
    ) -> EwResult<Self> {
        config.validate()?;

        Ok(Self {
            trace: SessionTrace::with_capacity(config.trace_capacity),
            config,
            participants,
            host,
            random,
            session: SessionState::default(),
            timers: PendingTimers::new(),
            now_ms: 0,
            spins: 0,
        })
    }

    /// Create with an OS-seeded random source
    pub fn with_os_random(
        config: WheelConfig,
        participants: ParticipantList,
        host: H,
    ) -> EwResult<Self> {
        Self::new(config, participants, host, Box::new(RngSource::from_os()))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Apply the host's visibility flag
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.open();
        } else {
            self.hide();
        }
    }

    /// Make the widget visible; does not start a spin
    ///
    /// Returns `false` if it was already visible.
    pub fn open(&mut self) -> bool {
        if self.is_visible() {
            return false;
        }

        self.timers.cancel_all();
        self.session = SessionState::opened();
        self.record(WheelStage::Opened {
            participant_count: self.participants.len(),
        });
        log::debug!("Wheel opened with {} participants", self.participants.len());
        true
    }

    /// Hide the widget from the host side
    ///
    /// Cancels every pending timer and clears rotation, result and reveal.
    /// No host callback is made. Returns `false` if there was nothing to
    /// tear down.
    pub fn hide(&mut self) -> bool {
        let from = self.session.state;
        let generation = self.timers.generation();
        let cancelled = self.timers.cancel_all();

        if from == SequenceState::Closed && cancelled == 0 {
            return false;
        }

        self.session = SessionState::default();
        self.record_in(
            WheelStage::Hidden {
                from,
                cancelled_timers: cancelled,
            },
            generation,
        );
        log::debug!(
            "Wheel hidden from {} ({} timer(s) cancelled)",
            from.display_name(),
            cancelled
        );
        true
    }

    /// Cancel everything without recording or calling back
    ///
    /// Runs on drop.
    pub fn teardown(&mut self) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::debug!("Teardown cancelled {} pending timer(s)", cancelled);
        }
        self.session = SessionState::default();
    }

    /// Replace the participant list
    ///
    /// Refused while a spin cycle is in flight so the drawn index keeps
    /// pointing into the list it was drawn from.
    pub fn set_participants(&mut self, participants: ParticipantList) -> bool {
        if self.session.state.is_busy() {
            log::debug!("Participant update refused while {}", self.session.state.display_name());
            return false;
        }
        self.participants = participants;
        true
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TRIGGERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a spin
    ///
    /// Ignored unless the widget is visible, idle and has participants.
    pub fn start(&mut self) -> bool {
        if let Some(reason) = self.start_refusal() {
            return self.refuse_start(reason);
        }

        let Some(outcome) = select_outcome(
            self.participants.len(),
            self.config.rotations,
            self.random.as_mut(),
        ) else {
            return self.refuse_start(Refusal::NoParticipants);
        };

        self.spins += 1;
        self.session = SessionState {
            state: SequenceState::Spinning,
            outcome: Some(outcome),
            rotation: outcome.target_rotation,
            ..SessionState::opened()
        };

        self.host.announce(SPIN_ANNOUNCEMENT);
        self.timers.arm(
            TimerKind::Reveal,
            self.now_ms.saturating_add(self.config.spin_timer_ms()),
        );

        self.record(WheelStage::SpinStart {
            chosen_index: outcome.chosen_index,
            target_rotation: outcome.target_rotation,
        });
        log::info!(
            "Spin #{} started: {} participants, target {:.1}°",
            self.spins,
            self.participants.len(),
            outcome.target_rotation
        );
        true
    }

    /// User-initiated close
    ///
    /// Refused mid-spin. From `Idle` or `Revealing` it cancels everything
    /// and calls `on_close` straight away.
    pub fn dismiss(&mut self) -> bool {
        let from = self.session.state;
        if !from.can_dismiss() {
            let reason = match from {
                SequenceState::Closed => Refusal::Hidden,
                _ => Refusal::Spinning,
            };
            return self.refuse_dismiss(reason);
        }

        let generation = self.timers.generation();
        self.timers.cancel_all();
        self.session = SessionState::default();

        self.host.on_close();
        self.record_in(WheelStage::Dismissed { from }, generation);
        log::debug!("Wheel dismissed from {}", from.display_name());
        true
    }

    /// Keyboard input; returns whether the key was consumed
    ///
    /// Escape dismisses only while idle. Enter and Space start a spin.
    pub fn handle_key(&mut self, key: WheelKey) -> bool {
        let idle = self.session.state.can_start();
        match key {
            WheelKey::Escape if idle => self.dismiss(),
            key if key.is_activate() && idle && !self.participants.is_empty() => self.start(),
            _ => false,
        }
    }

    fn start_refusal(&self) -> Option<Refusal> {
        let state = self.session.state;
        if state.can_start() {
            return self.participants.is_empty().then_some(Refusal::NoParticipants);
        }
        match state {
            SequenceState::Closed => Some(Refusal::Hidden),
            _ => Some(Refusal::Busy),
        }
    }

    fn refuse_start(&mut self, reason: Refusal) -> bool {
        log::debug!("Start refused: {}", reason.as_str());
        self.record(WheelStage::StartRefused { reason });
        false
    }

    fn refuse_dismiss(&mut self, reason: Refusal) -> bool {
        log::debug!("Dismiss refused: {}", reason.as_str());
        self.record(WheelStage::DismissRefused { reason });
        false
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CLOCK
    // ═══════════════════════════════════════════════════════════════════════════

    /// Move the clock forward by `elapsed_ms`, firing due timers
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.advance_to(self.now_ms.saturating_add(elapsed_ms))
    }

    /// Move the clock to `now_ms`, firing due timers in order
    ///
    /// Timers armed by a firing timer also fire if they fall due before
    /// `now_ms`. The clock never moves backwards. Returns the number of
    /// timers fired.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let target = now_ms.max(self.now_ms);
        let mut fired = 0;

        while let Some(timer) = self.timers.pop_due(target) {
            self.now_ms = self.now_ms.max(timer.deadline_ms);
            self.fire(timer.kind);
            fired += 1;
        }

        self.now_ms = target;
        fired
    }

    /// Fire every armed timer back to back, jumping the clock
    pub fn run_to_completion(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline() {
            fired += self.advance_to(deadline);
        }
        fired
    }

    /// Earliest pending deadline on the sequencer clock
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Time left until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now_ms))
    }

    fn fire(&mut self, kind: TimerKind) {
        log::trace!("[{}ms] {:?} fired", self.now_ms, kind);
        match kind {
            TimerKind::Reveal => self.begin_reveal(),
            TimerKind::Eliminate => self.notify_elimination(),
            TimerKind::Close => self.finish(),
        }
    }

    fn begin_reveal(&mut self) {
        if self.session.state != SequenceState::Spinning {
            log::warn!("Reveal timer fired in {}", self.session.state.display_name());
            return;
        }

        let name = self
            .session
            .outcome
            .and_then(|o| self.participants.get(o.chosen_index))
            .map(str::to_string);
        let Some(name) = name else {
            log::warn!("Chosen index no longer in participant list, closing");
            self.hide();
            return;
        };

        self.session.state = SequenceState::Revealing;
        self.session.reveal = Some(RevealProgress::start(&name, self.now_ms));
        self.session.chosen = Some(name.clone());

        self.host.announce(&elimination_announcement(&name));
        self.timers.arm(
            TimerKind::Eliminate,
            self.now_ms.saturating_add(self.config.timing.reveal_duration_ms),
        );

        self.record(WheelStage::RevealStart { name });
    }

    fn notify_elimination(&mut self) {
        if self.session.state != SequenceState::Revealing || self.session.eliminated {
            log::warn!("Elimination timer fired out of sequence");
            return;
        }
        let Some(name) = self.session.chosen.clone() else {
            return;
        };

        log::info!("Eliminated '{}'", name);
        self.host.on_eliminated(&name);
        self.session.eliminated = true;

        self.timers.arm(
            TimerKind::Close,
            self.now_ms.saturating_add(self.config.timing.auto_close_delay_ms),
        );
        self.record(WheelStage::Eliminated { name });
    }

    fn finish(&mut self) {
        if self.session.state != SequenceState::Revealing || !self.session.eliminated {
            log::warn!("Close timer fired out of sequence");
            return;
        }

        let generation = self.timers.generation();
        self.timers.cancel_all();
        self.session = SessionState::default();

        self.host.on_close();
        self.record_in(WheelStage::Closed, generation);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EVENTS
    // ═══════════════════════════════════════════════════════════════════════════

    fn record(&mut self, stage: WheelStage) {
        let generation = self.timers.generation();
        self.record_in(stage, generation);
    }

    fn record_in(&mut self, stage: WheelStage, generation: u64) {
        log::debug!("[{}ms] stage {}", self.now_ms, stage.type_name());
        self.trace
            .push(WheelEvent::new(stage, self.now_ms, generation));
    }

    /// Take the buffered stage events
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        self.trace.drain()
    }

    /// Buffered stage events
    pub fn trace(&self) -> &SessionTrace {
        &self.trace
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> SequenceState {
        self.session.state
    }

    pub fn is_visible(&self) -> bool {
        self.session.state != SequenceState::Closed
    }

    pub fn is_spinning(&self) -> bool {
        self.session.state == SequenceState::Spinning
    }

    /// Current wheel rotation in degrees (0 when reset)
    pub fn rotation(&self) -> f64 {
        self.session.rotation
    }

    /// Outcome of the spin in flight
    pub fn outcome(&self) -> Option<&SpinOutcome> {
        self.session.outcome.as_ref()
    }

    /// Chosen name once revealed
    pub fn chosen(&self) -> Option<&str> {
        self.session.chosen.as_deref()
    }

    /// Portion of the chosen name typed so far
    pub fn revealed_text(&self) -> String {
        self.session
            .reveal
            .as_ref()
            .map(|r| r.visible_text(self.now_ms, &self.config.timing))
            .unwrap_or_default()
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Sequencer clock (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Current timer generation
    pub fn generation(&self) -> u64 {
        self.timers.generation()
    }

    /// Spins started over the sequencer's lifetime
    pub fn spins(&self) -> u64 {
        self.spins
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        let reveal_complete = self
            .session
            .reveal
            .as_ref()
            .is_some_and(|r| r.is_complete(self.now_ms, &self.config.timing));

        WheelSnapshot {
            state: self.session.state,
            visible: self.is_visible(),
            spinning: self.is_spinning(),
            rotation: self.session.rotation,
            segment_angle: self.participants.segment_angle(),
            participant_count: self.participants.len(),
            chosen: self.session.chosen.clone(),
            revealed_text: self.revealed_text(),
            reveal_complete,
            pending_timers: self.timers.len(),
            now_ms: self.now_ms,
        }
    }
}

impl<H: WheelHost> Drop for Sequencer<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::random::SequenceSource;

    fn sequencer(names: &[&str], draws: Vec<f64>) -> Sequencer<RecordingHost> {
        Sequencer::new(
            WheelConfig::default(),
            ParticipantList::new(names.iter().copied()),
            RecordingHost::new(),
            Box::new(SequenceSource::new(draws)),
        )
        .unwrap()
    }

    #[test]
    fn test_hidden_sequencer_refuses_start() {
        let mut seq = sequencer(&["Red", "Blue"], vec![0.0, 0.5]);
        assert_eq!(seq.state(), SequenceState::Closed);
        assert!(!seq.start());
        assert!(seq.trace().has_stage("start_refused"));
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_full_cycle_timing() {
        // n=2, draw 0.75 → index 1
        let mut seq = sequencer(&["Red", "Blue"], vec![0.75, 0.5]);
        seq.open();
        assert!(seq.start());
        assert_eq!(seq.state(), SequenceState::Spinning);
        assert_eq!(seq.next_deadline(), Some(6200));

        seq.advance(6199);
        assert_eq!(seq.state(), SequenceState::Spinning);
        assert!(seq.chosen().is_none());

        seq.advance(1);
        assert_eq!(seq.state(), SequenceState::Revealing);
        assert_eq!(seq.chosen(), Some("Blue"));
        assert_eq!(seq.next_deadline(), Some(12_200));

        seq.advance(200);
        assert_eq!(seq.revealed_text(), "BL");

        seq.advance_to(12_200);
        assert_eq!(seq.host().eliminated(), vec!["Blue"]);
        assert_eq!(seq.state(), SequenceState::Revealing);
        assert_eq!(seq.host().close_count(), 0);

        seq.advance_to(12_700);
        assert_eq!(seq.host().close_count(), 1);
        assert_eq!(seq.state(), SequenceState::Closed);
        assert_eq!(seq.rotation(), 0.0);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_single_advance_fires_whole_chain_in_order() {
        let mut seq = sequencer(&["Red"], vec![0.3, 0.5]);
        seq.open();
        seq.start();

        assert_eq!(seq.advance(60_000), 3);
        assert_eq!(
            seq.host().lifecycle_calls(),
            vec![
                &HostCall::Eliminated { name: "Red".into() },
                &HostCall::Closed
            ]
        );
        assert_eq!(seq.now_ms(), 60_000);
    }

    #[test]
    fn test_announcements() {
        let mut seq = sequencer(&["Red"], vec![0.3, 0.5]);
        seq.open();
        seq.start();
        seq.advance(6200);

        assert_eq!(
            seq.host().announcements(),
            vec![SPIN_ANNOUNCEMENT, "Red has been eliminated"]
        );
    }

    #[test]
    fn test_dismiss_refused_mid_spin() {
        let mut seq = sequencer(&["Red", "Blue"], vec![0.0, 0.5]);
        seq.open();
        seq.start();

        assert!(!seq.dismiss());
        assert_eq!(seq.state(), SequenceState::Spinning);
        assert_eq!(seq.pending_timers(), 1);
    }

    #[test]
    fn test_dismiss_during_reveal_skips_elimination() {
        let mut seq = sequencer(&["Red", "Blue"], vec![0.0, 0.5]);
        seq.open();
        seq.start();
        seq.advance(6200);

        assert!(seq.dismiss());
        assert_eq!(seq.host().close_count(), 1);
        assert_eq!(seq.pending_timers(), 0);

        seq.advance(60_000);
        assert!(seq.host().eliminated().is_empty());
        assert_eq!(seq.host().close_count(), 1);
    }

    #[test]
    fn test_keyboard_surface() {
        let mut seq = sequencer(&["Red", "Blue"], vec![0.0, 0.5]);
        seq.open();

        assert!(!seq.handle_key(WheelKey::Other));
        assert!(seq.handle_key(WheelKey::Space));
        assert!(seq.is_spinning());

        // Neither key does anything mid-spin or mid-reveal
        assert!(!seq.handle_key(WheelKey::Enter));
        assert!(!seq.handle_key(WheelKey::Escape));
        seq.advance(6200);
        assert!(!seq.handle_key(WheelKey::Escape));
        assert_eq!(seq.state(), SequenceState::Revealing);

        seq.run_to_completion();
        seq.open();
        assert!(seq.handle_key(WheelKey::Escape));
        assert_eq!(seq.state(), SequenceState::Closed);
        assert_eq!(seq.host().close_count(), 2);
    }

    #[test]
    fn test_participants_locked_while_busy() {
        let mut seq = sequencer(&["Red", "Blue"], vec![0.0, 0.5]);
        seq.open();
        seq.start();
        assert!(!seq.set_participants(ParticipantList::new(["Cyan"])));

        seq.run_to_completion();
        assert!(seq.set_participants(ParticipantList::new(["Cyan"])));
        assert_eq!(seq.participants().len(), 1);
    }

    #[test]
    fn test_snapshot_during_reveal() {
        let mut seq = sequencer(&["Red", "Blue", "Lime"], vec![0.5, 0.5]);
        seq.open();
        seq.start();
        seq.advance(6200 + 150);

        let snap = seq.snapshot();
        assert_eq!(snap.state, SequenceState::Revealing);
        assert!(!snap.spinning);
        assert_eq!(snap.chosen.as_deref(), Some("Blue"));
        assert_eq!(snap.revealed_text, "B");
        assert!(!snap.reveal_complete);
        assert_eq!(snap.participant_count, 3);
        assert_eq!(snap.pending_timers, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Sequencer::new(
            WheelConfig::default().rotations(0),
            ParticipantList::default(),
            RecordingHost::new(),
            Box::new(SequenceSource::new(vec![0.0])),
        );
        assert!(result.is_err());
    }
}
