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

use std::{fmt, time::Duration};
use serde::{Serialize,Deserialize};
use tracing::{debug,trace};

use crate::clock::SimTime;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Default)]
pub enum OperatingMode {
    #[default] Standby,
    TrafficAdvisoryOnly,
    FullAdvisory,
}

impl OperatingMode {
    pub fn is_active (&self)->bool { *self != OperatingMode::Standby }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperatingMode::Standby => "STBY",
            OperatingMode::TrafficAdvisoryOnly => "TA ONLY",
            OperatingMode::FullAdvisory => "TA/RA",
        };
        write!( f, "{s}")
    }
}

/// throttles TCAS updates with two independent frequency caps: an update only runs if both the simulated time
/// and the wall clock time since the last update reached their respective minimum interval. This means slowed down
/// simulations are limited by sim time and accelerated simulations by wall clock time
#[derive(Debug,Clone)]
pub struct UpdateScheduler {
    min_sim_interval: i64,  // millis
    min_wall_interval: i64, // millis
    last_sim: i64,
    last_wall: i64,
}

impl UpdateScheduler {
    pub fn new (min_sim_interval: Duration, min_wall_interval: Duration)->Self {
        UpdateScheduler {
            min_sim_interval: min_sim_interval.as_millis() as i64,
            min_wall_interval: min_wall_interval.as_millis() as i64,
            last_sim: 0,
            last_wall: 0
        }
    }

    /// is an update due for the given sim and wall clock times. Standby never updates
    pub fn is_due (&self, mode: OperatingMode, sim_time: SimTime, wall_millis: i64)->bool {
        if !mode.is_active() {
            return false
        }

        let d_sim = (sim_time.millis() - self.last_sim).abs();
        let d_wall = (wall_millis - self.last_wall).abs();

        if d_sim < self.min_sim_interval || d_wall < self.min_wall_interval {
            trace!("skipping tick at {sim_time} (dt_sim={d_sim}ms, dt_wall={d_wall}ms)");
            false
        } else {
            true
        }
    }

    pub fn record_update (&mut self, sim_time: SimTime, wall_millis: i64) {
        self.last_sim = sim_time.millis();
        self.last_wall = wall_millis;
    }
}

/// switches between standby and operating mode on ground transitions of the own airplane, after a delay (sim time).
/// Pending changes are cancelled by explicit mode changes or further ground transitions
#[derive(Debug,Clone)]
pub struct GroundModeAutomation {
    takeoff_delay: Duration,
    landing_delay: Duration,
    operating_mode: OperatingMode, // what to switch to after takeoff
    on_ground: Option<bool>,
    pending: Option<(SimTime,OperatingMode)>,
}

impl GroundModeAutomation {
    pub fn new (takeoff_delay: Duration, landing_delay: Duration, operating_mode: OperatingMode)->Self {
        GroundModeAutomation { takeoff_delay, landing_delay, operating_mode, on_ground: None, pending: None }
    }

    pub fn pending (&self)->Option<(SimTime,OperatingMode)> { self.pending }

    pub fn cancel (&mut self) {
        if self.pending.take().is_some() {
            debug!("cancelled pending operating mode change");
        }
    }

    /// feed the current ground state, scheduling a change if it flipped
    pub fn set_on_ground (&mut self, on_ground: bool, sim_time: SimTime, current_mode: OperatingMode) {
        if self.on_ground == Some(on_ground) {
            return
        }
        let is_transition = self.on_ground.is_some();
        self.on_ground = Some(on_ground);
        if !is_transition {
            return // first sample only establishes the state
        }

        self.cancel();
        if on_ground {
            if current_mode.is_active() {
                self.pending = Some( (sim_time.add_duration( self.landing_delay), OperatingMode::Standby));
            }
        } else if !current_mode.is_active() {
            self.pending = Some( (sim_time.add_duration( self.takeoff_delay), self.operating_mode));
        }
    }

    /// the mode to switch to if a pending change is due at `sim_time`
    pub fn poll (&mut self, sim_time: SimTime)->Option<OperatingMode> {
        match self.pending {
            Some((due,mode)) if sim_time >= due => {
                self.pending = None;
                Some(mode)
            }
            _ => None
        }
    }
}
