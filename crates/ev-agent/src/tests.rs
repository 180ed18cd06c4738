//! Unit tests for ev-agent.

use ev_core::{AgentId, AgentRng, TimeUnit};
use ev_data::{
    CarCatalog, CarSpec, DistanceMatrix, FixedSpeed, ModelOptions, RechargeCurve, RechargeCurves,
    ReferenceData, StartTimeTable, StartTimeWindow,
};

use crate::{
    ActivityKind, Agent, AgentError, AgentParams, Car, Drive, History, Location, Place,
    SimContext, State, StateEnv, Status,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-6;

/// 60 kWh, 300 km range, 8 h full recharge, 1 %/h idle discharge.
fn spec() -> CarSpec {
    CarSpec::new("Test", "EV", 60.0, 300.0, 8.0, 1.0).unwrap()
}

fn car(charge: f64) -> Car {
    Car::with_charge(spec(), charge).unwrap()
}

/// One home `h` and one work place `w`, `distance_km` apart; departures at
/// exactly 08:00 and 17:00.
struct World {
    data:    ReferenceData,
    speed:   FixedSpeed,
    options: ModelOptions,
}

impl World {
    fn new(distance_km: f64) -> Self {
        let distances =
            DistanceMatrix::new(vec!["h".into()], vec![("w".into(), vec![distance_km])]).unwrap();

        let mut cars = CarCatalog::new();
        cars.insert("test", spec());

        let mut behaviors = RechargeCurves::new();
        behaviors.insert("always", RechargeCurve::new([(0.0, 100.0), (100.0, 100.0)]));
        behaviors.insert("never", RechargeCurve::new(std::iter::empty()));

        let mut start_times = StartTimeTable::new();
        let at = |h: f64| StartTimeWindow { start_h: h, end_h: h, cumulative_pct: 100.0 };
        start_times.push("home", "work", at(8.0));
        start_times.push("work", "home", at(17.0));

        Self {
            data:    ReferenceData::new(distances, cars, behaviors, start_times).unwrap(),
            speed:   FixedSpeed(40.0),
            options: ModelOptions::default(),
        }
    }

    fn starting_at(mut self, hour: f64) -> Self {
        self.options.start_unix_secs = (hour * 3_600.0) as i64;
        self
    }

    fn ctx(&self) -> SimContext<'_> {
        SimContext::new(&self.data, &self.speed, &self.options)
    }

    fn params(&self, charge: f64, behavior: &str) -> AgentParams {
        AgentParams {
            id:                AgentId(0),
            home:              self.data.location_id("h").unwrap(),
            work:              self.data.location_id("w").unwrap(),
            car:               car(charge),
            recharge_behavior: behavior.into(),
        }
    }

    fn agent(&self, charge: f64, behavior: &str) -> Agent {
        Agent::new(&self.ctx(), self.params(charge, behavior), AgentRng::new(1, AgentId(0))).unwrap()
    }

    fn agent_with_schedule(&self, charge: f64, depart_home_h: f64, depart_work_h: f64) -> Agent {
        Agent::with_schedule(
            &self.ctx(),
            self.params(charge, "never"),
            AgentRng::new(1, AgentId(0)),
            depart_home_h,
            depart_work_h,
        )
        .unwrap()
    }
}

fn run_state(state: &mut State, car: &mut Car, secs: f64) -> Result<f64, AgentError> {
    let mut location = Location::Home;
    let mut env = StateEnv::new(car, &mut location);
    state.run(&mut env, secs)
}

// ── Car ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod car {
    use super::*;

    #[test]
    fn new_car_is_full() {
        let c = Car::new(spec()).unwrap();
        assert_eq!(c.charge(), 100.0);
        assert_eq!(c.energy_kwh(), 60.0);
        assert_eq!(c.recharged_kwh(), 0.0);
    }

    #[test]
    fn charge_must_stay_in_range() {
        let mut c = car(50.0);
        assert!(matches!(c.set_charge(100.1), Err(AgentError::InvalidCharge(v)) if v == 100.1));
        assert!(c.set_charge(-0.1).is_err());
        assert!(c.set_charge(f64::NAN).is_err());
        assert_eq!(c.charge(), 50.0);
    }

    #[test]
    fn delta_is_validated() {
        let mut c = car(50.0);
        c.set_charge_by_delta(-20.0).unwrap();
        assert_eq!(c.charge(), 30.0);
        assert!(matches!(
            c.set_charge_by_delta(80.0),
            Err(AgentError::InvalidChargeDelta { delta, .. }) if delta == 80.0
        ));
        assert_eq!(c.charge(), 30.0);
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let mut bad = spec();
        bad.full_range_km = -1.0;
        assert!(matches!(Car::new(bad), Err(AgentError::Data(_))));
    }

    #[test]
    fn error_message_names_value_and_constraint() {
        let msg = AgentError::InvalidCharge(120.0).to_string();
        assert!(msg.contains("120") && msg.contains("[0, 100]"), "{msg}");
    }
}

// ── Location / History ────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use super::*;

    #[test]
    fn display_encoding() {
        assert_eq!(Location::Home.to_string(), "home");
        assert_eq!(Location::Work.to_string(), "work");
        let en_route = Location::EnRoute { from: Place::Home, to: Place::Work, pct_remaining: 45 };
        assert_eq!(en_route.to_string(), "home|work=045");
        let back = Location::EnRoute { from: Place::Work, to: Place::Home, pct_remaining: 100 };
        assert_eq!(back.to_string(), "work|home=100");
    }

    #[test]
    fn only_places_allow_recharging() {
        assert!(Location::Home.can_recharge());
        assert!(Location::Work.can_recharge());
        let en_route = Location::EnRoute { from: Place::Home, to: Place::Work, pct_remaining: 5 };
        assert!(!en_route.can_recharge());
        assert_eq!(en_route.place(), None);
    }

    #[test]
    fn history_evicts_oldest() {
        let mut h = History::new(3);
        for i in 0..3 {
            assert_eq!(h.push(i), None);
        }
        assert_eq!(h.push(3), Some(0));
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(h.last(), Some(&3));
    }

    #[test]
    fn zero_capacity_history_is_unbounded() {
        let mut h = History::new(0);
        for i in 0..1_000 {
            assert_eq!(h.push(i), None);
        }
        assert_eq!(h.len(), 1_000);
    }
}

// ── State protocol ────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn run_auto_starts_and_zero_duration_is_noop() {
        let mut s = State::idle();
        let mut c = car(50.0);
        assert_eq!(s.status(), Status::Pending);
        assert_eq!(run_state(&mut s, &mut c, 0.0).unwrap(), 0.0);
        assert_eq!(s.status(), Status::Running);
        assert_eq!(c.charge(), 50.0);
    }

    #[test]
    fn negative_duration_fails() {
        let mut s = State::idle();
        let mut c = car(50.0);
        assert!(matches!(
            run_state(&mut s, &mut c, -1.0),
            Err(AgentError::InvalidDuration(v)) if v == -1.0
        ));
    }

    #[test]
    fn double_start_and_stop_when_pending_fail() {
        let mut s = State::idle();
        let mut c = car(50.0);
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);
        assert!(matches!(s.stop(&mut env), Err(AgentError::NotRunning(Status::Pending))));
        s.start(&mut env).unwrap();
        assert!(matches!(s.start(&mut env), Err(AgentError::AlreadyStarted(Status::Running))));
    }

    #[test]
    fn stopped_is_terminal() {
        let mut s = State::idle();
        let mut c = car(50.0);
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);
        s.start(&mut env).unwrap();
        s.stop(&mut env).unwrap();
        assert!(matches!(s.run(&mut env, 10.0), Err(AgentError::Stopped)));
        assert!(matches!(s.stop(&mut env), Err(AgentError::NotRunning(Status::Stopped))));
        assert_eq!(s.status(), Status::Stopped);
    }

    #[test]
    fn budget_caps_run_and_stops() {
        let mut s = State::idle();
        s.set_duration(10.0, TimeUnit::Minutes).unwrap();
        let mut c = car(50.0);
        assert_eq!(run_state(&mut s, &mut c, 240.0).unwrap(), 240.0);
        assert_eq!(s.status(), Status::Running);
        // 360 s left; asking for exactly that also stops the state.
        assert_eq!(run_state(&mut s, &mut c, 3_600.0).unwrap(), 360.0);
        assert_eq!(s.status(), Status::Stopped);
        assert_eq!(s.elapsed(TimeUnit::Seconds), 600.0);
        assert_eq!(s.duration(TimeUnit::Minutes), Some(10.0));
    }

    #[test]
    fn budget_cannot_shrink_below_elapsed() {
        let mut s = State::idle();
        let mut c = car(50.0);
        run_state(&mut s, &mut c, 120.0).unwrap();
        assert!(matches!(
            s.set_duration(1.0, TimeUnit::Minutes),
            Err(AgentError::DurationBelowElapsed { .. })
        ));
        assert!(matches!(s.set_duration(-1.0, TimeUnit::Seconds), Err(AgentError::InvalidDuration(_))));
        s.set_duration(2.0, TimeUnit::Minutes).unwrap();
    }

    #[test]
    fn split_runs_sum_to_total() {
        let mut s = State::recharge();
        let mut c = car(10.0);
        let total: f64 = [1.0, 59.0, 600.0, 0.5, 2_939.5]
            .iter()
            .map(|&d| run_state(&mut s, &mut c, d).unwrap())
            .sum();
        assert!((total - 3_600.0).abs() < EPS);
        assert!((s.elapsed(TimeUnit::Hours) - 1.0).abs() < EPS);
        assert!((c.charge() - 22.5).abs() < EPS);
    }

    #[test]
    fn log_carries_drive_fields() {
        let s = State::drive(Drive::new(Place::Home, Place::Work, 20.0, 40.0).unwrap());
        let log = s.log();
        assert_eq!(log.status, Status::Pending);
        let drive = log.drive.unwrap();
        assert_eq!((drive.from, drive.to), (Place::Home, Place::Work));
        assert_eq!(drive.remaining_km, 20.0);
        assert!(State::idle().log().drive.is_none());
    }
}

// ── Activities ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod activities {
    use super::*;

    #[test]
    fn drive_example_one_hour() {
        let mut s = State::drive(Drive::new(Place::Home, Place::Work, 100.0, 40.0).unwrap());
        let mut c = Car::with_charge(spec(), 50.0).unwrap();
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);

        let elapsed = s.run(&mut env, 3_600.0).unwrap();
        assert!((elapsed - 3_600.0).abs() < EPS);
        assert_eq!(s.status(), Status::Running);
        let drive = s.as_drive().unwrap();
        assert!((drive.remaining_km() - 60.0).abs() < EPS);
        assert!((drive.travelled_km() - 40.0).abs() < EPS);
        assert!((c.charge() - (50.0 - 40.0 / 300.0 * 100.0)).abs() < EPS);
        assert_eq!(loc.to_string(), "home|work=060");
    }

    #[test]
    fn drive_start_publishes_origin() {
        let mut s = State::drive(Drive::new(Place::Work, Place::Home, 20.0, 40.0).unwrap());
        let mut c = car(80.0);
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);
        s.start(&mut env).unwrap();
        assert_eq!(loc, Location::Work);
    }

    #[test]
    fn drive_finishes_early_at_destination() {
        let mut s = State::drive(Drive::new(Place::Home, Place::Work, 10.0, 40.0).unwrap());
        let mut c = car(100.0);
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);
        let elapsed = s.run(&mut env, 3_600.0).unwrap();
        assert!((elapsed - 900.0).abs() < EPS);
        assert_eq!(s.status(), Status::Stopped);
        assert_eq!(loc, Location::Work);
        assert!((c.charge() - (100.0 - 10.0 / 3.0)).abs() < EPS);
    }

    #[test]
    fn drive_limited_by_charge_returns_less_and_keeps_running() {
        let mut s = State::drive(Drive::new(Place::Home, Place::Work, 50.0, 40.0).unwrap());
        // 3 % of 300 km = 9 km.
        let mut c = car(3.0);
        let elapsed = run_state(&mut s, &mut c, 3_600.0).unwrap();
        assert!((elapsed - 9.0 / 40.0 * 3_600.0).abs() < EPS);
        assert_eq!(c.charge(), 0.0);
        assert_eq!(s.status(), Status::Running);
        assert!(!s.as_drive().unwrap().is_stranded());

        // Empty battery: time passes, nothing moves.
        let remaining = s.as_drive().unwrap().remaining_km();
        assert_eq!(run_state(&mut s, &mut c, 600.0).unwrap(), 600.0);
        assert_eq!(s.as_drive().unwrap().remaining_km(), remaining);
        assert!(s.as_drive().unwrap().is_stranded());
    }

    #[test]
    fn zero_length_trip_finishes_immediately() {
        let mut s = State::drive(Drive::new(Place::Home, Place::Work, 0.0, 40.0).unwrap());
        let mut c = car(50.0);
        let mut loc = Location::Home;
        let mut env = StateEnv::new(&mut c, &mut loc);
        assert_eq!(s.run(&mut env, 360.0).unwrap(), 0.0);
        assert_eq!(s.status(), Status::Stopped);
        assert_eq!(loc, Location::Work);
        assert_eq!(c.charge(), 50.0);
    }

    #[test]
    fn drive_rejects_bad_inputs() {
        assert!(matches!(
            Drive::new(Place::Home, Place::Work, 10.0, 0.0),
            Err(AgentError::InvalidSpeed(_))
        ));
        assert!(matches!(
            Drive::new(Place::Home, Place::Work, -1.0, 40.0),
            Err(AgentError::InvalidDistance(_))
        ));
        assert!(matches!(
            Drive::resume(Place::Home, Place::Work, 10.0, 40.0, 11.0),
            Err(AgentError::InvalidRemaining { .. })
        ));
    }

    #[test]
    fn turn_back_reverses_progress() {
        let d = Drive::resume(Place::Home, Place::Work, 20.0, 40.0, 15.0).unwrap();
        let back = d.turn_back();
        assert_eq!((back.from(), back.to()), (Place::Work, Place::Home));
        assert_eq!(back.remaining_km(), 5.0);
        assert_eq!(back.location().to_string(), "work|home=025");
    }

    #[test]
    fn recharge_example_clamps_at_full() {
        let mut s = State::recharge();
        let mut c = car(90.0);
        assert_eq!(run_state(&mut s, &mut c, 3_600.0).unwrap(), 3_600.0);
        assert_eq!(c.charge(), 100.0);
        assert!((c.recharged_kwh() - 6.0).abs() < EPS);
        // Full: never stops by itself, adds nothing.
        assert_eq!(run_state(&mut s, &mut c, 3_600.0).unwrap(), 3_600.0);
        assert_eq!(s.status(), Status::Running);
        assert!((c.recharged_kwh() - 6.0).abs() < EPS);
    }

    #[test]
    fn recharge_is_linear_in_hours() {
        let mut s = State::recharge();
        let mut c = car(20.0);
        run_state(&mut s, &mut c, 2.0 * 3_600.0).unwrap();
        assert!((c.charge() - 45.0).abs() < EPS);
    }

    #[test]
    fn instant_recharge_car_fills_at_once() {
        let mut fast = spec();
        fast.full_recharge_h = 0.0;
        let mut c = Car::with_charge(fast, 10.0).unwrap();
        run_state(&mut State::recharge(), &mut c, 1.0).unwrap();
        assert_eq!(c.charge(), 100.0);
    }

    #[test]
    fn idle_example_clamps_at_zero() {
        let mut s = State::idle();
        let mut c = car(0.5);
        assert_eq!(run_state(&mut s, &mut c, 3_600.0).unwrap(), 3_600.0);
        assert_eq!(c.charge(), 0.0);
    }

    #[test]
    fn idle_is_linear_in_hours() {
        let mut s = State::idle();
        let mut c = car(50.0);
        run_state(&mut s, &mut c, 1_800.0).unwrap();
        run_state(&mut s, &mut c, 5_400.0).unwrap();
        assert!((c.charge() - 48.0).abs() < EPS);
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;

    #[test]
    fn departures_are_sampled_from_distribution() {
        let world = World::new(20.0);
        let a = world.agent(100.0, "never");
        assert_eq!(a.depart_home_h(), 8.0);
        assert_eq!(a.depart_work_h(), 17.0);
        assert_eq!(a.recharge_behavior(), "never");
    }

    #[test]
    fn unknown_behavior_is_rejected() {
        let world = World::new(20.0);
        let err = Agent::new(&world.ctx(), world.params(100.0, "eager"), AgentRng::new(1, AgentId(0)));
        assert!(matches!(err, Err(AgentError::Data(_))));
    }

    #[test]
    fn invalid_departure_hour_is_rejected() {
        let world = World::new(20.0);
        let err = Agent::with_schedule(
            &world.ctx(),
            world.params(100.0, "never"),
            AgentRng::new(1, AgentId(0)),
            25.0,
            17.0,
        );
        assert!(matches!(err, Err(AgentError::InvalidDepartureHour(h)) if h == 25.0));
    }

    #[test]
    fn zero_run_is_noop_and_negative_fails() {
        let world = World::new(20.0);
        let ctx = world.ctx();
        let mut a = world.agent(100.0, "never");
        a.run(&ctx, 0.0, TimeUnit::Seconds).unwrap();
        assert_eq!(a.timestamp(), 0.0);
        let err = a.run(&ctx, -5.0, TimeUnit::Seconds).unwrap_err();
        assert!(matches!(err, AgentError::InvalidDuration(d) if d == -5.0));
        assert!(err.to_string().contains("-5"), "{err}");
    }

    #[test]
    fn full_day_commute_without_recharging() {
        let world = World::new(20.0);
        let ctx = world.ctx();
        let mut a = world.agent(100.0, "never");
        for _ in 0..240 {
            a.run(&ctx, 6.0, TimeUnit::Minutes).unwrap();
            assert!((0.0..=100.0).contains(&a.car().charge()));
        }
        assert!((a.timestamp() - 86_400.0).abs() < EPS);
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.state().kind(), ActivityKind::Idle);
        // 23 h idle at 1 %/h plus 2 × 20 km of a 300 km range.
        assert!((a.car().charge() - (100.0 - 23.0 - 40.0 / 3.0)).abs() < EPS);
        // Idle → Drive → Idle → Drive → Idle.
        assert_eq!(a.states().len(), 4);
        assert_eq!(a.logs().len(), 5);
        let kinds: Vec<_> = a.states().iter().map(State::kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Idle, ActivityKind::Drive, ActivityKind::Idle, ActivityKind::Drive]
        );
    }

    #[test]
    fn full_day_commute_with_recharging() {
        let world = World::new(20.0);
        let ctx = world.ctx();
        let mut a = world.agent(100.0, "always");
        for _ in 0..240 {
            a.run(&ctx, 360.0, TimeUnit::Seconds).unwrap();
        }
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.state().kind(), ActivityKind::Recharge);
        assert_eq!(a.car().charge(), 100.0);
        // Work: 100 − 8 − 6.67 back to 100; home: 93.33 back to 100.
        let expected_pct = (8.0 + 20.0 / 3.0) + 20.0 / 3.0;
        assert!((a.car().recharged_kwh() - expected_pct / 100.0 * 60.0).abs() < EPS);
    }

    #[test]
    fn history_is_bounded_by_options() {
        let mut world = World::new(20.0);
        world.options.max_agent_states = 2;
        world.options.max_agent_logs = 3;
        let ctx = world.ctx();
        let mut a = world.agent(100.0, "never");
        for _ in 0..(3 * 240) {
            a.run(&ctx, 360.0, TimeUnit::Seconds).unwrap();
        }
        assert_eq!(a.states().len(), 2);
        assert_eq!(a.logs().len(), 3);
    }

    #[test]
    fn uneven_steps_cover_requested_time() {
        let world = World::new(35.0);
        let ctx = world.ctx();
        let mut a = world.agent(60.0, "always");
        let steps = [37.0, 1_234.0, 360.0, 0.25, 5_000.0, 59.75, 2_718.0];
        let mut total = 0.0;
        for i in 0..400 {
            let d = steps[i % steps.len()];
            a.run(&ctx, d, TimeUnit::Seconds).unwrap();
            total += d;
            let c = a.car().charge();
            assert!((0.0..=100.0).contains(&c), "charge {c}");
        }
        assert!((a.timestamp() - total).abs() < 1e-3);
    }

    #[test]
    fn stranded_agent_stays_in_place() {
        let world = World::new(20.0);
        let ctx = world.ctx();
        // Leaves home at midnight with 3 km of range.
        let mut a = world.agent_with_schedule(1.0, 0.0, 23.9);
        assert_eq!(a.state().kind(), ActivityKind::Drive);

        a.run(&ctx, 1.0, TimeUnit::Hours).unwrap();
        assert!(a.is_stranded());
        assert_eq!(a.car().charge(), 0.0);
        assert_eq!(a.location().to_string(), "home|work=085");
        assert!((a.timestamp() - 3_600.0).abs() < EPS);

        a.run(&ctx, 1.0, TimeUnit::Hours).unwrap();
        assert!(a.is_stranded());
        assert_eq!(a.location().to_string(), "home|work=085");
        assert!((a.timestamp() - 7_200.0).abs() < EPS);
    }
}

// ── Transition policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use super::*;

    #[test]
    fn idle_at_home_drives_to_work() {
        let world = World::new(20.0).starting_at(7.0);
        let mut a = world.agent(100.0, "never");
        let next = a.next_state(&world.ctx()).unwrap();
        let drive = next.as_drive().unwrap();
        assert_eq!((drive.from(), drive.to()), (Place::Home, Place::Work));
        assert_eq!(drive.distance_km(), 20.0);
        assert_eq!(drive.speed_kmh(), 40.0);
    }

    #[test]
    fn idle_at_work_drives_home() {
        let world = World::new(20.0).starting_at(12.0);
        let mut a = world.agent(100.0, "never");
        assert_eq!(a.location(), Location::Work);
        let next = a.next_state(&world.ctx()).unwrap();
        let drive = next.as_drive().unwrap();
        assert_eq!((drive.from(), drive.to()), (Place::Work, Place::Home));
    }

    #[test]
    fn drive_en_route_cannot_recharge() {
        let world = World::new(20.0).starting_at(8.25);
        let mut a = world.agent(100.0, "always");
        assert!(a.wants_recharge(&world.ctx()).unwrap());
        assert!(!a.can_recharge());
        assert_eq!(a.next_state(&world.ctx()).unwrap().kind(), ActivityKind::Idle);
    }

    #[test]
    fn drive_never_follows_drive() {
        for behavior in ["always", "never"] {
            let world = World::new(20.0).starting_at(8.25);
            let mut a = world.agent(100.0, behavior);
            let next = a.next_state(&world.ctx()).unwrap().kind();
            assert_ne!(next, ActivityKind::Drive);
        }
    }

    #[test]
    fn probabilistic_rule_uses_desire_as_probability() {
        let mut world = World::new(20.0).starting_at(12.0);
        world.options.recharge_rule = ev_data::RechargeRule::Probabilistic;
        let ctx = world.ctx();
        let mut always = world.agent(100.0, "always");
        let mut never = world.agent(100.0, "never");
        for _ in 0..50 {
            assert!(always.wants_recharge(&ctx).unwrap());
            assert!(!never.wants_recharge(&ctx).unwrap());
        }
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use super::*;

    #[test]
    fn before_departure_idles_at_home() {
        let world = World::new(20.0).starting_at(7.0);
        let a = world.agent(100.0, "never");
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.state().kind(), ActivityKind::Idle);
        assert_eq!(a.state().status(), Status::Pending);
        assert_eq!(a.logs().len(), 1);
    }

    #[test]
    fn mid_morning_drive_is_fast_forwarded() {
        let world = World::new(20.0).starting_at(8.25);
        let a = world.agent(100.0, "never");
        assert_eq!(a.state().kind(), ActivityKind::Drive);
        assert_eq!(a.location().to_string(), "home|work=050");
        assert!((a.state().elapsed(TimeUnit::Hours) - 0.25).abs() < EPS);
        assert_eq!(a.timestamp(), 8.25 * 3_600.0);
    }

    #[test]
    fn working_hours_idle_at_work() {
        let world = World::new(20.0).starting_at(12.0);
        let a = world.agent(100.0, "never");
        assert_eq!(a.location(), Location::Work);
        assert_eq!(a.state().kind(), ActivityKind::Idle);
        assert!((a.state().elapsed(TimeUnit::Hours) - 3.5).abs() < EPS);
        assert!((a.car().charge() - 96.5).abs() < EPS);
    }

    #[test]
    fn evening_drive_is_fast_forwarded() {
        let world = World::new(20.0).starting_at(17.25);
        let a = world.agent(100.0, "never");
        assert_eq!(a.location().to_string(), "work|home=050");
    }

    #[test]
    fn night_idles_at_home() {
        let world = World::new(20.0).starting_at(20.0);
        let a = world.agent(100.0, "never");
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.state().kind(), ActivityKind::Idle);
        assert!((a.state().elapsed(TimeUnit::Hours) - 2.5).abs() < EPS);
    }

    #[test]
    fn crossing_departure_time_starts_drive() {
        let world = World::new(20.0).starting_at(7.9);
        let ctx = world.ctx();
        let mut a = world.agent(100.0, "never");
        a.run(&ctx, 360.0, TimeUnit::Seconds).unwrap();
        // 08:00 exactly: departure time reached.
        assert_eq!(a.state().kind(), ActivityKind::Drive);
        assert_eq!(a.state().status(), Status::Running);
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.states().last().map(State::status), Some(Status::Stopped));
    }

    #[test]
    fn late_in_the_day_turns_back_mid_trip() {
        let world = World::new(20.0);
        let ctx = world.ctx();
        // On the road at midnight, but due home from 00:03.
        let mut a = world.agent_with_schedule(100.0, 0.0, 0.05);
        a.run(&ctx, 360.0, TimeUnit::Seconds).unwrap();
        let drive = a.state().as_drive().unwrap();
        assert_eq!((drive.from(), drive.to()), (Place::Work, Place::Home));
        assert!((drive.remaining_km() - 4.0).abs() < EPS);
        assert_eq!(a.location().to_string(), "work|home=020");

        a.run(&ctx, 400.0, TimeUnit::Seconds).unwrap();
        assert_eq!(a.location(), Location::Home);
        assert_eq!(a.state().kind(), ActivityKind::Idle);
    }
}
