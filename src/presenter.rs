use crate::clock::Clock;
use crate::config::{Cadence, TrackerConfig};
use crate::elapsed::Calculator;
use crate::particles::ParticleField;
use crate::snapshot::Snapshot;
use crate::terminal;
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use rand::Rng;
use std::io;
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};

/// State of the live view between timer callbacks.
pub struct LiveState {
    calculator: Calculator,
    cadence: Cadence,
    snapshot: Snapshot,
    particles: ParticleField,
}

impl LiveState {
    pub fn new(config: &TrackerConfig, clock: &dyn Clock) -> Self {
        let calculator = Calculator::new(config.start);
        Self {
            snapshot: Snapshot::take(&calculator, clock),
            calculator,
            cadence: config.cadence,
            particles: ParticleField::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn on_tick(&mut self, clock: &dyn Clock) {
        let next = Snapshot::take(&self.calculator, clock);
        if next.occasion != self.snapshot.occasion {
            log::debug!("occasion changed to {:?}", next.occasion.map(|o| o.kind));
        }
        self.snapshot = next;
    }

    pub fn on_heart<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.particles.spawn_heart(rng, now, self.cadence.heart_ttl);
    }

    pub fn on_sparkle<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.particles.spawn_sparkle(rng, now, self.cadence.sparkle_ttl);
    }

    /// Sweeps expired particles and lays out the next frame.
    pub fn on_frame(&mut self, now: Instant, cols: u16, rows: u16) -> Vec<String> {
        let reaped = self.particles.reap(now);
        if reaped > 0 {
            log::trace!("reaped {reaped} particles, {} live", self.particles.len());
        }
        terminal::compose(&self.snapshot, &self.particles, now, cols, rows)
    }

    pub fn shutdown(&mut self) {
        self.particles.clear();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Runs the live terminal view until the user quits.
pub async fn run_live(config: &TrackerConfig, clock: &dyn Clock) -> Result<()> {
    terminal::enter().context("Failed to prepare the terminal")?;
    log::debug!("live view started");

    let result = event_loop(config, clock).await;
    let restored = terminal::restore().context("Failed to restore the terminal");

    log::debug!("live view stopped");
    result.and(restored)
}

async fn event_loop(config: &TrackerConfig, clock: &dyn Clock) -> Result<()> {
    let cadence = config.cadence;
    let mut state = LiveState::new(config, clock);
    let mut rng = rand::thread_rng();
    let mut stdout = io::stdout();
    let mut events = EventStream::new();

    let mut tick = interval(cadence.tick);
    let mut hearts = interval(cadence.heart_every);
    let mut sparkles = interval(cadence.sparkle_every);
    let mut frame = interval(cadence.frame);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            _ = tick.tick() => {
                state.on_tick(clock);
            }
            _ = hearts.tick() => {
                state.on_heart(&mut rng, Instant::now());
            }
            _ = sparkles.tick() => {
                state.on_sparkle(&mut rng, Instant::now());
            }
            _ = frame.tick() => {
                let (cols, rows) = match crossterm::terminal::size() {
                    Ok(size) => size,
                    Err(err) => break Err(err.into()),
                };
                let lines = state.on_frame(Instant::now(), cols, rows);
                if let Err(err) = terminal::draw(&mut stdout, &lines) {
                    break Err(err);
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit(&key) => break Ok(()),
                Some(Ok(_)) => {}
                Some(Err(err)) => break Err(err.into()),
                None => break Ok(()),
            },
            _ = &mut ctrl_c => break Ok(()),
        }
    };

    state.shutdown();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::occasion::OccasionKind;
    use chrono::{NaiveDate, NaiveDateTime};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn test_tick_recomputes_snapshot() {
        let config = TrackerConfig::default();
        let mut state = LiveState::new(&config, &FixedClock::new(at(2024, 6, 11, 23, 59, 59)));
        assert_eq!(state.snapshot().occasion, None);

        // 2024-06-11 is a Tuesday; midnight rolls into the anniversary
        state.on_tick(&FixedClock::new(at(2024, 6, 12, 0, 0, 0)));
        assert_eq!(
            state.snapshot().occasion.map(|o| o.kind),
            Some(OccasionKind::Anniversary)
        );
        assert_eq!(state.snapshot().elapsed.years, 4);
        assert_eq!(state.snapshot().elapsed.months, 0);
        assert_eq!(state.snapshot().elapsed.days, 0);
    }

    #[test]
    fn test_timers_do_not_leak_particles() {
        let config = TrackerConfig::default();
        let cadence = config.cadence;
        let mut state = LiveState::new(&config, &FixedClock::new(at(2024, 5, 16, 12, 0, 0)));
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = Instant::now();

        // Drive the heart and sparkle timers by hand for 30 seconds
        let step = Duration::from_millis(100);
        let mut next_heart = Duration::ZERO;
        let mut next_sparkle = Duration::ZERO;
        let mut elapsed = Duration::ZERO;
        while elapsed < Duration::from_secs(30) {
            let now = t0 + elapsed;
            if elapsed >= next_heart {
                state.on_heart(&mut rng, now);
                next_heart += cadence.heart_every;
            }
            if elapsed >= next_sparkle {
                state.on_sparkle(&mut rng, now);
                next_sparkle += cadence.sparkle_every;
            }
            let lines = state.on_frame(now, 80, 24);
            assert_eq!(lines.len(), 24);
            assert!(state.particles().len() <= 10);
            elapsed += step;
        }

        state.on_frame(t0 + Duration::from_secs(60), 80, 24);
        assert!(state.particles().is_empty());
    }

    #[test]
    fn test_shutdown_clears_particles() {
        let config = TrackerConfig::default();
        let mut state = LiveState::new(&config, &FixedClock::new(at(2024, 5, 16, 12, 0, 0)));
        let mut rng = StdRng::seed_from_u64(2);
        state.on_heart(&mut rng, Instant::now());
        state.on_sparkle(&mut rng, Instant::now());
        state.shutdown();
        assert!(state.particles().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
