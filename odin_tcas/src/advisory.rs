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

//! alert classification of intruders. TCAS only guarantees when classifiers are called (once per update for each
//! intruder of the filtered set), what tier to assign is up to the [`AlertClassifier`] strategy

use std::{collections::HashMap, time::Duration};
use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::{foot,nautical_mile}};

use crate::{
    clock::SimTime, contact::ContactId, intruder::Intruder, ownship::Ownship,
    scheduler::OperatingMode, sensitivity::SensitivityParams
};

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Default)]
pub enum AlertLevel {
    #[default] None,
    ProximityAdvisory,
    TrafficAdvisory,
    ResolutionAdvisory,
}

/// the state a classifier can use besides the intruder itself
pub struct ClassifierContext<'a> {
    pub sim_time: SimTime,
    pub mode: OperatingMode,
    pub ownship: &'a Ownship,
    pub sensitivity: &'a SensitivityParams,
}

impl<'a> ClassifierContext<'a> {
    pub fn is_on_ground (&self)->bool { self.ownship.on_ground }
}

pub trait AlertClassifier {
    /// the alert level `intruder` should have after this update
    fn classify (&mut self, ctx: &ClassifierContext, intruder: &Intruder)->AlertLevel;

    /// called when an intruder leaves the filtered set, to drop any per-intruder state
    fn intruder_removed (&mut self, id: ContactId) {}
}

#[derive(Debug,Clone,Copy,Default)]
struct TaTimes {
    ta_on: Option<SimTime>,
    ta_off: Option<SimTime>,
}

/// traffic advisory system classifier: issues traffic advisories (with on/off hysteresis) for intruders predicted to
/// violate the protected zone and proximity advisories for close traffic. Never issues resolution advisories
pub struct TasAlertClassifier {
    ta_on_hysteresis: Duration,
    ta_off_hysteresis: Duration,
    proximity_range: Length,
    proximity_height: Length,
    times: HashMap<ContactId,TaTimes>,
}

impl TasAlertClassifier {
    pub fn new (ta_on_hysteresis: Duration, ta_off_hysteresis: Duration, proximity_range: Length, proximity_height: Length)->Self {
        TasAlertClassifier { ta_on_hysteresis, ta_off_hysteresis, proximity_range, proximity_height, times: HashMap::new() }
    }

    fn non_ta_level (&self, ctx: &ClassifierContext, intruder: &Intruder)->AlertLevel {
        let (h_sep, v_sep) = intruder.predict_separation( ctx.sim_time);
        if h_sep <= self.proximity_range && v_sep <= self.proximity_height {
            AlertLevel::ProximityAdvisory
        } else {
            AlertLevel::None
        }
    }
}

impl Default for TasAlertClassifier {
    fn default()->Self {
        TasAlertClassifier::new( Duration::from_secs(2), Duration::from_secs(8),
                                 Length::new::<nautical_mile>(6.0), Length::new::<foot>(1200.0))
    }
}

/// negative deltas (clock reset) count as elapsed
fn has_elapsed (now: SimTime, then: Option<SimTime>, hysteresis: Duration)->bool {
    match then {
        Some(t) => {
            let dt = now.secs_since(t);
            dt < 0.0 || dt >= hysteresis.as_secs_f64()
        }
        None => true
    }
}

impl AlertClassifier for TasAlertClassifier {
    fn classify (&mut self, ctx: &ClassifierContext, intruder: &Intruder)->AlertLevel {
        if !intruder.is_prediction_valid() {
            return AlertLevel::None
        }

        let now = ctx.sim_time;
        let current = intruder.alert_level();
        let mut times = self.times.get( &intruder.id()).copied().unwrap_or_default();
        let was_ta = current == AlertLevel::TrafficAdvisory;

        let is_ta = if ctx.is_on_ground() { // no traffic advisories on the ground
            false
        } else if intruder.tca_norm() <= 1.0 {
            was_ta || has_elapsed( now, times.ta_off, self.ta_on_hysteresis)
        } else {
            was_ta && !has_elapsed( now, times.ta_on, self.ta_off_hysteresis)
        };

        let level = if is_ta { AlertLevel::TrafficAdvisory } else { self.non_ta_level( ctx, intruder) };

        // any change of level restarts the respective hysteresis interval
        if level != current {
            if level == AlertLevel::TrafficAdvisory { times.ta_on = Some(now) } else { times.ta_off = Some(now) }
        }
        self.times.insert( intruder.id(), times);

        level
    }

    fn intruder_removed (&mut self, id: ContactId) {
        self.times.remove( &id);
    }
}
