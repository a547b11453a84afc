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

use std::{fs, path::Path, time::Duration};
use serde::{Deserialize,Deserializer,Serialize,Serializer};
use parse_duration::parse;
use uom::si::{f64::{Length,Velocity}, length::{foot,nautical_mile}, velocity::knot};

use crate::{
    errors::{OdinTcasError, Result, config_error},
    advisory::TasAlertClassifier,
    scheduler::{GroundModeAutomation, OperatingMode, UpdateScheduler},
    sensitivity::{AltitudeSensitivity, SensitivityLevel, TAS_LEVELS},
};

pub fn deserialize_duration <'a,D>(deserializer: D) -> std::result::Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> std::result::Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct TcasConfig {
    /// capacity of the filtered (alerted) intruder set
    pub max_intruders: usize,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub sim_update_interval: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub real_update_interval: Duration,

    /// in knots. Slower contacts don't get a valid prediction
    pub min_ground_speed: f64,

    pub sensitivity_levels: Vec<SensitivityLevel>,

    /// switch between standby and operating mode based on the ownship on-ground state
    pub auto_mode: bool,
    pub operating_mode: OperatingMode, // what auto mode switches to after takeoff

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub takeoff_operate_delay: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub landing_standby_delay: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub ta_on_hysteresis: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub ta_off_hysteresis: Duration,

    pub proximity_range: f64,  // NM
    pub proximity_height: f64, // ft
}

impl Default for TcasConfig {
    fn default()->Self {
        TcasConfig {
            max_intruders: 30,
            sim_update_interval: Duration::from_secs(1),
            real_update_interval: Duration::from_secs(1),
            min_ground_speed: 30.0,
            sensitivity_levels: TAS_LEVELS.to_vec(),
            auto_mode: true,
            operating_mode: OperatingMode::TrafficAdvisoryOnly,
            takeoff_operate_delay: Duration::from_secs(8),
            landing_standby_delay: Duration::from_secs(24),
            ta_on_hysteresis: Duration::from_secs(2),
            ta_off_hysteresis: Duration::from_secs(8),
            proximity_range: 6.0,
            proximity_height: 1200.0,
        }
    }
}

impl TcasConfig {
    pub fn validate (&self)->Result<()> {
        if self.max_intruders == 0 {
            return Err( config_error!("max_intruders has to be positive"))
        }
        if !(self.min_ground_speed >= 0.0) {
            return Err( config_error!("invalid min_ground_speed {}", self.min_ground_speed))
        }
        if self.sensitivity_levels.is_empty() {
            return Err( config_error!("no sensitivity levels"))
        }
        for (i,level) in self.sensitivity_levels.iter().enumerate() {
            if !(level.lookahead_secs > 0.0 && level.protected_radius_nm > 0.0 && level.protected_height_ft > 0.0) {
                return Err( config_error!("sensitivity level {} has non-positive parameters: {:?}", i, level))
            }
        }
        if !self.operating_mode.is_active() {
            return Err( config_error!("auto mode target can't be {}", self.operating_mode))
        }
        if !(self.proximity_range > 0.0 && self.proximity_height > 0.0) {
            return Err( config_error!("proximity range and height have to be positive"))
        }
        Ok(())
    }

    pub fn min_ground_speed (&self)->Velocity { Velocity::new::<knot>( self.min_ground_speed) }

    pub fn create_sensitivity (&self)->AltitudeSensitivity {
        AltitudeSensitivity::new( self.sensitivity_levels.clone())
    }

    pub fn create_classifier (&self)->TasAlertClassifier {
        TasAlertClassifier::new( self.ta_on_hysteresis, self.ta_off_hysteresis,
                                 Length::new::<nautical_mile>( self.proximity_range), Length::new::<foot>( self.proximity_height))
    }

    pub fn create_scheduler (&self)->UpdateScheduler {
        UpdateScheduler::new( self.sim_update_interval, self.real_update_interval)
    }

    pub fn create_ground_automation (&self)->Option<GroundModeAutomation> {
        if self.auto_mode {
            Some( GroundModeAutomation::new( self.takeoff_operate_delay, self.landing_standby_delay, self.operating_mode))
        } else {
            None
        }
    }
}

pub fn parse_config (input: &str)->Result<TcasConfig> {
    let config: TcasConfig = ron::from_str( input)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config (path: impl AsRef<Path>)->Result<TcasConfig> {
    let input = fs::read_to_string( path)?;
    parse_config( &input)
}
