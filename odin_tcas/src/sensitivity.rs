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
use serde::{Serialize,Deserialize};
use tracing::warn;
use uom::si::{f64::{Length,Time}, length::{meter,foot,nautical_mile}, time::second};

use crate::tca::ProtectedZone;

/// the current TCAS sensitivity: lookahead time and protected zone dimensions
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SensitivityParams {
    pub lookahead: Time,
    pub protected_radius: Length,
    pub protected_height: Length, // half-height of the protected cylinder
}

impl SensitivityParams {
    pub fn new (lookahead: Time, protected_radius: Length, protected_height: Length)->Self {
        SensitivityParams { lookahead, protected_radius, protected_height }
    }

    pub fn lookahead_secs (&self)->f64 { self.lookahead.get::<second>() }

    pub fn protected_zone (&self)->ProtectedZone {
        ProtectedZone::new( self.protected_radius, self.protected_height)
    }
}

/// flight phase as far as sensitivity selection is concerned
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum FlightPhase {
    #[default] Enroute,
    Terminal,
    Approach,
}

/// what sensitivity strategies get to see at the start of each update
#[derive(Debug,Clone,Copy)]
pub struct SensitivityContext {
    pub altitude: Length,
    pub radar_altitude: Option<Length>,
    pub phase: FlightPhase,
    pub on_ground: bool,
}

/// strategy that provides (possibly time varying) sensitivity parameters
pub trait Sensitivity {
    fn update (&mut self, ctx: &SensitivityContext);
    fn params (&self)->SensitivityParams;
}

/// sensitivity that never changes
pub struct FixedSensitivity(pub SensitivityParams);

impl Sensitivity for FixedSensitivity {
    fn update (&mut self, ctx: &SensitivityContext) {}
    fn params (&self)->SensitivityParams { self.0 }
}

/// one row of the sensitivity level table (serialized in config units)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SensitivityLevel {
    pub lookahead_secs: f64,
    pub protected_radius_nm: f64,
    pub protected_height_ft: f64,
}

impl SensitivityLevel {
    pub const fn new (lookahead_secs: f64, protected_radius_nm: f64, protected_height_ft: f64)->Self {
        SensitivityLevel { lookahead_secs, protected_radius_nm, protected_height_ft }
    }

    pub fn params (&self)->SensitivityParams {
        SensitivityParams {
            lookahead: Time::new::<second>( self.lookahead_secs),
            protected_radius: Length::new::<nautical_mile>( self.protected_radius_nm),
            protected_height: Length::new::<foot>( self.protected_height_ft)
        }
    }
}

/// the traffic advisory system levels, from low altitude/approach (0) to high altitude (6)
pub const TAS_LEVELS: [SensitivityLevel;7] = [
    SensitivityLevel::new( 20.0, 0.2, 850.0),
    SensitivityLevel::new( 25.0, 0.2, 850.0),
    SensitivityLevel::new( 30.0, 0.35, 850.0),
    SensitivityLevel::new( 40.0, 0.55, 850.0),
    SensitivityLevel::new( 45.0, 0.8, 850.0),
    SensitivityLevel::new( 48.0, 1.1, 850.0),
    SensitivityLevel::new( 48.0, 1.1, 1200.0),
];

/// altitude and flight phase dependent sensitivity. Expects a 7 level table (see [`TAS_LEVELS`])
pub struct AltitudeSensitivity {
    levels: Vec<SensitivityLevel>,
    level: usize,
}

impl AltitudeSensitivity {
    /// an empty `levels` table falls back to [`TAS_LEVELS`]
    pub fn new (levels: Vec<SensitivityLevel>)->Self {
        let levels = if levels.is_empty() {
            warn!("empty sensitivity table, using default TAS levels");
            TAS_LEVELS.to_vec()
        } else {
            levels
        };
        let level = 2.min( levels.len().saturating_sub(1));
        AltitudeSensitivity { levels, level }
    }

    pub fn level (&self)->usize { self.level }

    pub fn select_level (ctx: &SensitivityContext)->usize {
        let alt_ft = ctx.altitude.get::<foot>();
        let radar_alt_ft = ctx.radar_altitude.map( |ra| ra.get::<foot>());

        if radar_alt_ft.map_or( true, |ra| ra > 2350.0) && ctx.phase == FlightPhase::Enroute {
            if alt_ft > 42000.0 { 6 }
            else if alt_ft > 20000.0 { 5 }
            else if alt_ft > 10000.0 { 4 }
            else if alt_ft > 5000.0 { 3 }
            else { 2 }
        } else if ctx.phase == FlightPhase::Terminal || radar_alt_ft.map_or( false, |ra| ra > 1000.0) {
            1
        } else {
            0
        }
    }
}

impl Default for AltitudeSensitivity {
    fn default()->Self { AltitudeSensitivity::new( TAS_LEVELS.to_vec()) }
}

impl Sensitivity for AltitudeSensitivity {
    fn update (&mut self, ctx: &SensitivityContext) {
        // shorter tables just saturate at their top level
        self.level = Self::select_level( ctx).min( self.levels.len().saturating_sub(1));
    }

    fn params (&self)->SensitivityParams {
        self.levels[self.level].params()
    }
}
