/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{rc::Rc, time::Duration};
use uom::si::{f64::{Length,Time,Velocity}, length::{foot,meter,nautical_mile}, time::second, velocity::{knot,foot_per_minute}};
use odin_tcas::{
    Tcas,
    advisory::{AlertLevel, TasAlertClassifier},
    clock::{ManualClock, SimTime},
    config::TcasConfig,
    contact::{ContactId, ContactReport, TrafficStore},
    geo::GeoPos,
    ownship::OwnshipTelemetry,
    scheduler::OperatingMode,
    sensitivity::{FixedSensitivity, SensitivityParams},
};

/// traffic advisory classification tests
/// run with "cargo test --test test_advisory -- --nocapture"

fn own_pos ()->GeoPos { GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.0, 1500.0) }

fn ownship (on_ground: bool)->OwnshipTelemetry {
    OwnshipTelemetry { on_ground, ..OwnshipTelemetry::new( own_pos(), 0.0, Velocity::new::<knot>(0.0), Velocity::new::<knot>(0.0)) }
}

fn report (dist_nm: f64, dalt_ft: f64, track: f64)->ContactReport {
    let pos = own_pos().offset( 0.0, Length::new::<nautical_mile>(dist_nm).get::<meter>(), Length::new::<foot>(dalt_ft).get::<meter>());
    ContactReport::with_velocity( pos, track, Velocity::new::<knot>(200.0), Velocity::new::<foot_per_minute>(0.0))
}

const CONVERGING: f64 = 180.0;
const DIVERGING: f64 = 0.0;

struct Scenario {
    tcas: Tcas,
    clock: Rc<ManualClock>,
    store: TrafficStore,
}

impl Scenario {
    fn new ()->Self {
        let config = TcasConfig { max_intruders: 10, auto_mode: false, ..TcasConfig::default() };
        let params = SensitivityParams::new( Time::new::<second>(48.0), Length::new::<nautical_mile>(0.5), Length::new::<foot>(850.0));
        let clock = Rc::new( ManualClock::new(0));
        let mut tcas = Tcas::new( &config, Box::new( FixedSensitivity(params)), Box::new( config.create_classifier()), Box::new( clock.clone())).unwrap();
        tcas.set_ownship_telemetry( ownship( false));
        Scenario { tcas, clock, store: TrafficStore::new( Duration::from_secs(30)) }
    }

    fn report (&mut self, id: u32, report: ContactReport, t: f64)->bool {
        self.store.update_contact( ContactId(id), &report, SimTime::from_secs_f64(t))
    }

    fn tick (&mut self, t: f64) {
        self.clock.set( (t * 1000.0) as i64);
        assert!( self.tcas.tick( SimTime::from_secs_f64(t), &self.store).unwrap());
    }

    fn level (&self, id: u32)->AlertLevel {
        self.tcas.intruder( ContactId(id)).map( |i| i.alert_level()).unwrap_or_default()
    }
}

#[test]
fn test_ta_hysteresis () {
    let mut s = Scenario::new();
    s.report( 1, report( 2.0, 0.0, CONVERGING), 0.0);
    s.tcas.init( &s.store);
    s.tcas.set_operating_mode( OperatingMode::TrafficAdvisoryOnly);

    let timeline = [
        (1.0, CONVERGING, AlertLevel::TrafficAdvisory),
        (2.0, DIVERGING, AlertLevel::TrafficAdvisory),  // TA holds for at least 8s
        (8.0, DIVERGING, AlertLevel::TrafficAdvisory),
        (9.0, DIVERGING, AlertLevel::ProximityAdvisory),
        (10.0, CONVERGING, AlertLevel::ProximityAdvisory), // no new TA within 2s of the last one ending
        (11.0, CONVERGING, AlertLevel::TrafficAdvisory),
    ];

    for (t, track, expected) in timeline {
        s.report( 1, report( 2.0, 0.0, track), t);
        s.tick( t);
        println!("  t={t:4.1} trk={track:5.1} -> {:?}", s.level(1));
        assert_eq!( s.level(1), expected);
    }

    // no traffic advisories on the ground
    s.tcas.set_ownship_telemetry( ownship( true));
    s.report( 1, report( 2.0, 0.0, CONVERGING), 12.0);
    s.tick( 12.0);
    assert_eq!( s.level(1), AlertLevel::ProximityAdvisory);
}

#[test]
fn test_proximity () {
    let mut s = Scenario::new();
    s.report( 1, report( 3.0, 0.0, DIVERGING), 0.0);    // close, not a threat
    s.report( 2, report( 8.0, 0.0, DIVERGING), 0.0);    // beyond proximity range
    s.report( 3, report( 1.0, 2000.0, CONVERGING), 0.0); // passes overhead
    s.report( 4, report( 1.0, 1000.0, DIVERGING), 0.0);
    s.tcas.init( &s.store);
    s.tcas.set_operating_mode( OperatingMode::FullAdvisory);
    s.tick( 1.0);

    for i in s.tcas.intruders().unwrap() { println!("  {i}"); }
    assert_eq!( s.level(1), AlertLevel::ProximityAdvisory);
    assert_eq!( s.level(2), AlertLevel::None);
    assert_eq!( s.level(3), AlertLevel::None);
    assert_eq!( s.level(4), AlertLevel::ProximityAdvisory);
    assert!( s.tcas.intruders().unwrap().iter().all( |i| i.is_filtered()));
}

#[test]
fn test_ta_on_delay_after_any_level_change () {
    let mut s = Scenario::new();
    s.report( 1, report( 2.0, 0.0, DIVERGING), 0.0);
    s.tcas.init( &s.store);
    s.tcas.set_operating_mode( OperatingMode::TrafficAdvisoryOnly);

    let timeline = [
        (1.0, DIVERGING, AlertLevel::ProximityAdvisory), // None -> PA also starts the TA-on delay
        (2.0, CONVERGING, AlertLevel::ProximityAdvisory),
        (3.0, CONVERGING, AlertLevel::TrafficAdvisory),
    ];

    for (t, track, expected) in timeline {
        s.report( 1, report( 2.0, 0.0, track), t);
        s.tick( t);
        println!("  t={t:4.1} trk={track:5.1} -> {:?}", s.level(1));
        assert_eq!( s.level(1), expected);
    }
}
