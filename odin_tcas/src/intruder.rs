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
use uom::si::{f64::{Length,Time,Velocity}, length::{meter,foot,nautical_mile}, time::second, velocity::{knot,foot_per_minute}};

use crate::{
    advisory::AlertLevel,
    clock::SimTime,
    contact::{ContactId, TrafficContact, MIN_GROUND_TRACK_DISTANCE_M},
    geo::{GeoPos, Vec3, nan_vec3, position_vector, velocity_vector, horizontal_length, vertical_length},
    ownship::Ownship,
    sensitivity::SensitivityParams,
    tca::{ProtectedZone, TcaSolution, solve_tca},
};

/// the TCAS record for a traffic contact, including its closest approach prediction.
/// Vectors are only valid for the update in which they were computed since the local frame moves with the own airplane.
/// If `is_prediction_valid` is false all derived values are NaN
#[derive(Debug,Clone)]
pub struct Intruder {
    pub(crate) id: ContactId,
    pub(crate) alert_level: AlertLevel,

    pub(crate) position: GeoPos,
    pub(crate) ground_track: f64,
    pub(crate) ground_speed: Velocity,
    pub(crate) vertical_speed: Velocity,

    pub(crate) position_vec: Vec3,
    pub(crate) velocity_vec: Vec3,
    pub(crate) relative_position_vec: Vec3,
    pub(crate) relative_velocity_vec: Vec3,

    pub(crate) is_prediction_valid: bool,
    pub(crate) tca: f64, // seconds
    pub(crate) tca_norm: f64,
    pub(crate) tca_displacement: Vec3,
    pub(crate) tca_horizontal_sep: f64, // meters
    pub(crate) tca_vertical_sep: f64, // meters

    pub(crate) last_update: SimTime,
    pub(crate) is_filtered: bool, // member of the alerted working set
}

impl Intruder {
    pub fn new (id: ContactId)->Self {
        Intruder {
            id,
            alert_level: AlertLevel::None,
            position: GeoPos::nan(),
            ground_track: f64::NAN,
            ground_speed: Velocity::new::<knot>( f64::NAN),
            vertical_speed: Velocity::new::<foot_per_minute>( f64::NAN),
            position_vec: nan_vec3(),
            velocity_vec: nan_vec3(),
            relative_position_vec: nan_vec3(),
            relative_velocity_vec: nan_vec3(),
            is_prediction_valid: false,
            tca: f64::NAN,
            tca_norm: f64::NAN,
            tca_displacement: nan_vec3(),
            tca_horizontal_sep: f64::NAN,
            tca_vertical_sep: f64::NAN,
            last_update: SimTime::default(),
            is_filtered: false,
        }
    }

    //--- accessors

    pub fn id (&self)->ContactId { self.id }
    pub fn alert_level (&self)->AlertLevel { self.alert_level }
    pub fn position (&self)->&GeoPos { &self.position }
    pub fn altitude (&self)->Length { self.position.altitude() }
    pub fn ground_track (&self)->f64 { self.ground_track }
    pub fn ground_speed (&self)->Velocity { self.ground_speed }
    pub fn vertical_speed (&self)->Velocity { self.vertical_speed }

    pub fn position_vec (&self)->&Vec3 { &self.position_vec }
    pub fn velocity_vec (&self)->&Vec3 { &self.velocity_vec }
    pub fn relative_position_vec (&self)->&Vec3 { &self.relative_position_vec }
    pub fn relative_velocity_vec (&self)->&Vec3 { &self.relative_velocity_vec }

    pub fn is_prediction_valid (&self)->bool { self.is_prediction_valid }
    pub fn tca (&self)->Time { Time::new::<second>( self.tca) }
    pub fn tca_secs (&self)->f64 { self.tca }
    pub fn tca_norm (&self)->f64 { self.tca_norm }
    pub fn tca_displacement (&self)->&Vec3 { &self.tca_displacement }
    pub fn tca_horizontal_sep (&self)->Length { Length::new::<meter>( self.tca_horizontal_sep) }
    pub fn tca_vertical_sep (&self)->Length { Length::new::<meter>( self.tca_vertical_sep) }

    /// predicted to violate the protected zone at TCA
    pub fn is_inside_zone (&self)->bool { self.is_prediction_valid && self.tca_norm <= 1.0 }

    pub fn is_filtered (&self)->bool { self.is_filtered }
    pub fn last_update (&self)->SimTime { self.last_update }

    //--- prediction

    /// recompute position, velocity and closest approach for `sim_time`. A missing contact invalidates the prediction
    pub fn update_prediction (&mut self, sim_time: SimTime, contact: Option<&dyn TrafficContact>, ownship: &Ownship,
                              params: &SensitivityParams, min_ground_speed: Velocity) {
        let is_valid = match contact {
            Some(contact) => self.update_parameters( sim_time, contact, ownship, min_ground_speed),
            None => false
        };

        if is_valid {
            self.update_tca( ownship, params);
        } else {
            self.invalidate();
        }
        self.last_update = sim_time;
    }

    fn update_parameters (&mut self, sim_time: SimTime, contact: &dyn TrafficContact, ownship: &Ownship, min_ground_speed: Velocity)->bool {
        let track = contact.ground_track().filter( |t| t.is_finite());
        let gs = contact.ground_speed().filter( |gs| gs.value.is_finite() && *gs >= min_ground_speed);
        let vs = contact.vertical_speed().filter( |vs| vs.value.is_finite());

        if let (Some(track), Some(gs), Some(vs)) = (track, gs, vs) {
            let pos = contact.predict( sim_time);
            if pos.is_nan() {
                return false
            }

            // the displayed track follows the dead reckoned course once the contact moved far enough to have a
            // defined bearing, the velocity vector always uses the reported track
            let last_pos = contact.last_position();
            self.ground_track = if last_pos.distance_to( &pos) < MIN_GROUND_TRACK_DISTANCE_M { track } else { last_pos.bearing_to( &pos) };
            self.position = pos;
            self.ground_speed = gs;
            self.vertical_speed = vs;

            self.position_vec = position_vector( &ownship.position, &pos);
            self.velocity_vec = velocity_vector( gs, track, vs);
            self.is_prediction_valid = true;
            true

        } else {
            false
        }
    }

    fn update_tca (&mut self, ownship: &Ownship, params: &SensitivityParams) {
        self.relative_position_vec = self.position_vec - ownship.position_vec;
        self.relative_velocity_vec = self.velocity_vec - ownship.velocity_vec;

        let zone = params.protected_zone();
        let solution = solve_tca( &self.relative_position_vec, &self.relative_velocity_vec, &zone, params.lookahead_secs());

        self.tca = solution.tca;
        self.tca_norm = solution.norm;
        self.tca_displacement = solution.displacement;
        self.tca_horizontal_sep = solution.horizontal_separation();
        self.tca_vertical_sep = solution.vertical_separation();
    }

    // no stale values survive an invalid update
    fn invalidate (&mut self) {
        self.is_prediction_valid = false;

        self.position = GeoPos::nan();
        self.ground_track = f64::NAN;
        self.ground_speed = Velocity::new::<knot>( f64::NAN);
        self.vertical_speed = Velocity::new::<foot_per_minute>( f64::NAN);

        self.position_vec = nan_vec3();
        self.velocity_vec = nan_vec3();
        self.relative_position_vec = nan_vec3();
        self.relative_velocity_vec = nan_vec3();

        self.tca = f64::NAN;
        self.tca_norm = f64::NAN;
        self.tca_displacement = nan_vec3();
        self.tca_horizontal_sep = f64::NAN;
        self.tca_vertical_sep = f64::NAN;
    }

    /// predicted displacement from the own airplane to this intruder at `sim_time`, extrapolated from the last update
    pub fn predict_displacement (&self, sim_time: SimTime)->Vec3 {
        if !self.is_prediction_valid {
            return nan_vec3()
        }
        let dt = sim_time.secs_since( self.last_update);
        self.relative_position_vec + self.relative_velocity_vec * dt
    }

    /// predicted (horizontal,vertical) separation at `sim_time`
    pub fn predict_separation (&self, sim_time: SimTime)->(Length,Length) {
        let d = self.predict_displacement( sim_time);
        ( Length::new::<meter>( horizontal_length(&d)), Length::new::<meter>( vertical_length(&d)) )
    }

    pub fn snapshot (&self)->IntruderSnapshot {
        IntruderSnapshot {
            id: self.id,
            alert_level: self.alert_level,
            is_prediction_valid: self.is_prediction_valid,
            position: self.position,
            ground_track: self.ground_track,
            ground_speed_kn: self.ground_speed.get::<knot>(),
            vertical_speed_fpm: self.vertical_speed.get::<foot_per_minute>(),
            tca: self.tca,
            tca_norm: self.tca_norm,
            tca_horizontal_sep_nm: self.tca_horizontal_sep().get::<nautical_mile>(),
            tca_vertical_sep_ft: self.tca_vertical_sep().get::<foot>(),
            date: self.last_update,
        }
    }
}

impl fmt::Display for Intruder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Intruder( id: {}, alert: {:?}", self.id, self.alert_level)?;
        if self.is_prediction_valid {
            write!( f, ", pos: {}, tca: {:.1}s, norm: {:.3}", self.position, self.tca, self.tca_norm)?;
        } else {
            write!( f, ", no prediction")?;
        }
        write!( f, " )")
    }
}

/// immutable copy of the externally relevant intruder state, sent with notifications
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct IntruderSnapshot {
    pub id: ContactId,
    pub alert_level: AlertLevel,
    pub is_prediction_valid: bool,
    pub position: GeoPos,
    pub ground_track: f64,
    pub ground_speed_kn: f64,
    pub vertical_speed_fpm: f64,
    pub tca: f64,
    pub tca_norm: f64,
    pub tca_horizontal_sep_nm: f64,
    pub tca_vertical_sep_ft: f64,
    pub date: SimTime,
}
