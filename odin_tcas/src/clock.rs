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

use std::{cell::Cell, fmt, time::Duration};
use serde::{Serialize,Deserialize};
use chrono::Utc;

/// simulated time as epoch milliseconds. This is the time reported by the simulation (or replay) that drives
/// updates and dead reckoning, which does not have to progress at the same rate as wall clock time
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Default)]
pub struct SimTime(i64);

impl SimTime {
    pub fn new (millis: i64)->Self { SimTime(millis) }
    pub fn from_secs_f64 (secs: f64)->Self { SimTime( (secs * 1000.0).round() as i64) }

    pub fn millis (&self)->i64 { self.0 }
    pub fn secs_f64 (&self)->f64 { self.0 as f64 / 1000.0 }

    /// signed difference in seconds
    pub fn secs_since (&self, earlier: SimTime)->f64 { (self.0 - earlier.0) as f64 / 1000.0 }

    pub fn add_duration (&self, d: Duration)->SimTime { SimTime( self.0 + d.as_millis() as i64) }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// source of wall clock time (epoch millis). Abstracted so that the update scheduler can be driven deterministically
pub trait WallClock {
    fn now_millis (&self)->i64;
}

pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis (&self)->i64 { Utc::now().timestamp_millis() }
}

/// a wall clock that only moves when told to
#[derive(Debug,Default)]
pub struct ManualClock {
    millis: Cell<i64>
}

impl ManualClock {
    pub fn new (millis: i64)->Self { ManualClock { millis: Cell::new(millis) } }

    pub fn set (&self, millis: i64) { self.millis.set(millis) }
    pub fn advance (&self, d: Duration) { self.millis.set( self.millis.get() + d.as_millis() as i64) }
}

impl WallClock for ManualClock {
    fn now_millis (&self)->i64 { self.millis.get() }
}

impl<T: WallClock> WallClock for std::rc::Rc<T> {
    fn now_millis (&self)->i64 { self.as_ref().now_millis() }
}
