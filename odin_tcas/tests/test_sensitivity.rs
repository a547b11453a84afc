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

use uom::si::{f64::{Length,Time}, length::{foot,nautical_mile}, time::second};
use odin_tcas::sensitivity::{
    AltitudeSensitivity, FixedSensitivity, FlightPhase, Sensitivity, SensitivityContext, SensitivityLevel,
    SensitivityParams, TAS_LEVELS
};

/// sensitivity level selection tests
/// run with "cargo test --test test_sensitivity -- --nocapture"

fn ctx (alt_ft: f64, radar_alt_ft: Option<f64>, phase: FlightPhase)->SensitivityContext {
    SensitivityContext {
        altitude: Length::new::<foot>( alt_ft),
        radar_altitude: radar_alt_ft.map( |ra| Length::new::<foot>( ra)),
        phase,
        on_ground: false
    }
}

#[test]
fn test_level_selection () {
    let cases = [
        (3000.0, None, FlightPhase::Enroute, 2),
        (8000.0, None, FlightPhase::Enroute, 3),
        (15000.0, None, FlightPhase::Enroute, 4),
        (30000.0, Some(30000.0), FlightPhase::Enroute, 5),
        (45000.0, None, FlightPhase::Enroute, 6),
        (2000.0, Some(1500.0), FlightPhase::Enroute, 1),
        (800.0, Some(500.0), FlightPhase::Enroute, 0),
        (9000.0, None, FlightPhase::Terminal, 1),
        (9000.0, None, FlightPhase::Approach, 0),
        (3000.0, Some(2000.0), FlightPhase::Approach, 1),
    ];

    for (alt, ra, phase, expected) in cases {
        let level = AltitudeSensitivity::select_level( &ctx( alt, ra, phase));
        println!("  alt={alt}ft ra={ra:?} {phase:?} -> {level}");
        assert_eq!( level, expected);
    }
}

#[test]
fn test_altitude_sensitivity () {
    let mut sens = AltitudeSensitivity::default();
    assert_eq!( sens.level(), 2);

    sens.update( &ctx( 25000.0, None, FlightPhase::Enroute));
    assert_eq!( sens.level(), 5);
    let params = sens.params();
    assert_eq!( params.lookahead_secs(), 48.0);
    assert!( (params.protected_radius.get::<nautical_mile>() - 1.1).abs() < 1e-9);
    assert!( (params.protected_height.get::<foot>() - 850.0).abs() < 1e-9);

    // shorter tables saturate at their top level
    let mut short = AltitudeSensitivity::new( TAS_LEVELS[..3].to_vec());
    short.update( &ctx( 45000.0, None, FlightPhase::Enroute));
    assert_eq!( short.level(), 2);
    assert_eq!( short.params(), TAS_LEVELS[2].params());

    // an empty table falls back to the default levels
    let mut empty = AltitudeSensitivity::new( Vec::new());
    assert_eq!( empty.level(), 2);
    assert_eq!( empty.params(), TAS_LEVELS[2].params());
    empty.update( &ctx( 25000.0, None, FlightPhase::Enroute));
    assert_eq!( empty.level(), 5);
    assert_eq!( empty.params(), TAS_LEVELS[5].params());
}

#[test]
fn test_fixed_sensitivity () {
    let params = SensitivityParams::new( Time::new::<second>(30.0), Length::new::<nautical_mile>(0.5), Length::new::<foot>(500.0));
    let mut sens = FixedSensitivity( params);
    sens.update( &ctx( 45000.0, None, FlightPhase::Enroute));
    assert_eq!( sens.params(), params);

    let zone = params.protected_zone();
    assert!( (zone.radius - 926.0).abs() < 1e-9);
    assert!( (zone.half_height - 152.4).abs() < 1e-9);
}
