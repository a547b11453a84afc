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

use std::time::Duration;
use odin_tcas::{
    config::{TcasConfig, load_config, parse_config},
    errors::OdinTcasError,
    scheduler::OperatingMode,
    sensitivity::{Sensitivity, TAS_LEVELS},
};

/// configuration tests
/// run with "cargo test --test test_config -- --nocapture"

#[test]
fn test_load_config () {
    let config = load_config( "configs/odin_tcas.ron").unwrap();
    println!("{config:#?}");

    assert_eq!( config.max_intruders, 30);
    assert_eq!( config.sim_update_interval, Duration::from_secs(1));
    assert_eq!( config.landing_standby_delay, Duration::from_secs(24));
    assert_eq!( config.sensitivity_levels, TAS_LEVELS.to_vec());
    assert_eq!( config.operating_mode, OperatingMode::TrafficAdvisoryOnly);
    assert!( config.create_ground_automation().is_some());

    assert!( matches!( load_config( "configs/no_such_file.ron"), Err(OdinTcasError::IOError(_))));
}

#[test]
fn test_partial_config () {
    let config = parse_config( r#"( max_intruders: 8, real_update_interval: "200ms", auto_mode: false )"#).unwrap();
    assert_eq!( config.max_intruders, 8);
    assert_eq!( config.real_update_interval, Duration::from_millis(200));
    assert_eq!( config.ta_off_hysteresis, Duration::from_secs(8)); // default
    assert!( config.create_ground_automation().is_none());

    let sens = config.create_sensitivity();
    assert_eq!( sens.params(), TAS_LEVELS[2].params());
}

#[test]
fn test_invalid_config () {
    let cases = [
        r#"( max_intruders: 0 )"#,
        r#"( sensitivity_levels: [] )"#,
        r#"( sensitivity_levels: [ (lookahead_secs: 20.0, protected_radius_nm: 0.0, protected_height_ft: 850.0) ] )"#,
        r#"( operating_mode: Standby )"#,
        r#"( proximity_range: -1.0 )"#,
    ];
    for input in cases {
        let res = parse_config( input);
        println!("  {input} -> {:?}", res.as_ref().err());
        assert!( matches!( res, Err(OdinTcasError::ConfigError(_))));
    }

    assert!( matches!( parse_config( r#"( sim_update_interval: "soon" )"#), Err(OdinTcasError::RonError(_))));
    assert!( TcasConfig::default().validate().is_ok());
}
