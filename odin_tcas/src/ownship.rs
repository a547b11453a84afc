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

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::{si::{f64::{Length,Velocity}, length::{meter,foot}, velocity::{knot,foot_per_minute}}, ConstZero};

use crate::{clock::SimTime, geo::{GeoPos, Vec3, velocity_vector}};

/// a telemetry sample of the own airplane
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct OwnshipTelemetry {
    pub position: GeoPos,
    pub ground_track: f64, // true, degrees
    pub ground_speed: Velocity,
    pub vertical_speed: Velocity,
    pub on_ground: bool,
}

impl OwnshipTelemetry {
    pub fn new (position: GeoPos, ground_track: f64, ground_speed: Velocity, vertical_speed: Velocity)->Self {
        OwnshipTelemetry { position, ground_track, ground_speed, vertical_speed, on_ground: false }
    }

    pub fn altitude (&self)->Length { self.position.altitude() }
}

impl Default for OwnshipTelemetry {
    fn default()->Self {
        OwnshipTelemetry {
            position: GeoPos::from_lon_lat_degrees_alt_meters( 0.0, 0.0, 0.0),
            ground_track: 0.0,
            ground_speed: Velocity::ZERO,
            vertical_speed: Velocity::ZERO,
            on_ground: false
        }
    }
}

/// the observer state. The local frame is centered on the own airplane, hence its position vector is always the origin
#[derive(Debug,Clone)]
pub struct Ownship {
    pub position: GeoPos,
    pub ground_track: f64,
    pub ground_speed: Velocity,
    pub vertical_speed: Velocity,
    pub on_ground: bool,

    pub position_vec: Vec3,
    pub velocity_vec: Vec3,

    pub last_update: SimTime,
}

impl Ownship {
    pub fn new ()->Self {
        Ownship {
            position: GeoPos::from_lon_lat_degrees_alt_meters( 0.0, 0.0, 0.0),
            ground_track: 0.0,
            ground_speed: Velocity::ZERO,
            vertical_speed: Velocity::ZERO,
            on_ground: false,
            position_vec: Vec3::zeros(),
            velocity_vec: Vec3::zeros(),
            last_update: SimTime::default()
        }
    }

    /// re-center the local frame on the latest telemetry sample
    pub fn update (&mut self, sim_time: SimTime, sample: &OwnshipTelemetry) {
        self.position = sample.position;
        self.ground_track = sample.ground_track;
        self.ground_speed = sample.ground_speed;
        self.vertical_speed = sample.vertical_speed;
        self.on_ground = sample.on_ground;

        self.position_vec = Vec3::zeros();
        self.velocity_vec = velocity_vector( self.ground_speed, self.ground_track, self.vertical_speed);
        self.last_update = sim_time;
    }

    pub fn altitude (&self)->Length { self.position.altitude() }
}

impl fmt::Display for Ownship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Ownship( pos: {}, trk: {:.0}, spd: {:.0}kn, vs: {:.0}fpm )", self.position, self.ground_track,
                self.ground_speed.get::<knot>(), self.vertical_speed.get::<foot_per_minute>())
    }
}
