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

//! the traffic contact interface TCAS consumes, plus a simple map based contact store that derives
//! kinematics from position reports and dead reckons contacts between reports

use std::{collections::HashMap, fmt, time::Duration};
use serde::{Serialize,Deserialize};
use uom::si::{f64::{Length,Velocity}, length::meter, velocity::{knot,foot_per_minute,meter_per_second}};
use tracing::{debug,trace};

use crate::{clock::SimTime, geo::{GeoPos, normalize_360}};

/// opaque identity of an external traffic contact
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize)]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// what TCAS needs to know about a traffic contact
pub trait TrafficContact {
    fn id (&self)->ContactId;

    /// dead reckoned position at `sim_time`. All fields are NaN if the contact has no kinematic solution
    fn predict (&self, sim_time: SimTime)->GeoPos;

    fn last_position (&self)->GeoPos;
    fn last_contact_time (&self)->SimTime;

    /// true ground track in degrees, None if undefined
    fn ground_track (&self)->Option<f64>;
    fn ground_speed (&self)->Option<Velocity>;
    fn vertical_speed (&self)->Option<Velocity>;
}

/// lookup of live contacts by id
pub trait ContactSource {
    fn contact (&self, id: ContactId)->Option<&dyn TrafficContact>;
    fn contact_ids (&self)->Vec<ContactId>;
}

/// a single position report for a contact. Velocity fields are optional, missing ones are derived from consecutive reports
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct ContactReport {
    pub position: GeoPos,
    pub ground_track: Option<f64>,
    pub ground_speed: Option<Velocity>,
    pub vertical_speed: Option<Velocity>,
}

impl ContactReport {
    pub fn position (position: GeoPos)->Self {
        ContactReport { position, ground_track: None, ground_speed: None, vertical_speed: None }
    }

    pub fn with_velocity (position: GeoPos, ground_track: f64, ground_speed: Velocity, vertical_speed: Velocity)->Self {
        ContactReport { position, ground_track: Some(ground_track), ground_speed: Some(ground_speed), vertical_speed: Some(vertical_speed) }
    }
}

const MAX_VALID_GROUND_SPEED_KT: f64 = 1500.0;
const MAX_VALID_VERTICAL_SPEED_FPM: f64 = 10000.0;
pub(crate) const MIN_GROUND_TRACK_DISTANCE_M: f64 = 10.0;

#[derive(Debug,Clone)]
pub struct TrackedContact {
    pub id: ContactId,
    last_position: GeoPos,
    last_contact_time: SimTime,
    ground_track: Option<f64>,
    ground_speed: Option<Velocity>,
    vertical_speed: Option<Velocity>,
    reset_after: Duration, // max gap between reports before we discard derived kinematics
}

impl TrackedContact {
    pub fn new (id: ContactId, report: &ContactReport, sim_time: SimTime, reset_after: Duration)->Self {
        let mut contact = TrackedContact {
            id,
            last_position: report.position,
            last_contact_time: sim_time,
            ground_track: None,
            ground_speed: None,
            vertical_speed: None,
            reset_after
        };
        contact.reset( report, sim_time);
        contact
    }

    pub fn update (&mut self, report: &ContactReport, sim_time: SimTime) {
        let dt = sim_time.secs_since( self.last_contact_time);
        if dt < 0.0 || dt > self.reset_after.as_secs_f64() {
            debug!("resetting contact {} after {}s report gap", self.id, dt);
            self.reset( report, sim_time);
            return
        }

        if dt > 0.0 {
            self.update_kinematics( dt, report);
        }
        self.last_position = report.position;

        if self.is_plausible() {
            self.last_contact_time = sim_time;
        } else {
            debug!("resetting contact {} with implausible kinematics", self.id);
            self.reset( report, sim_time);
        }
    }

    // reported values take precedence over derived ones
    fn update_kinematics (&mut self, dt: f64, report: &ContactReport) {
        let last = &self.last_position;
        let pos = &report.position;

        let dist = last.distance_to( pos);
        self.ground_speed = report.ground_speed.or( Some( Velocity::new::<meter_per_second>( dist / dt)));

        self.ground_track = if report.ground_track.is_some() {
            report.ground_track.map( normalize_360)
        } else if dist >= MIN_GROUND_TRACK_DISTANCE_M {
            Some( last.bearing_to( pos))
        } else {
            self.ground_track // too close to tell, keep what we had
        };

        self.vertical_speed = report.vertical_speed.or( Some( Velocity::new::<meter_per_second>( (pos.alt - last.alt) / dt)));
    }

    fn reset (&mut self, report: &ContactReport, sim_time: SimTime) {
        self.last_position = report.position;
        self.last_contact_time = sim_time;
        self.ground_track = report.ground_track.map( normalize_360);
        self.ground_speed = report.ground_speed;
        self.vertical_speed = report.vertical_speed;
    }

    fn is_plausible (&self)->bool {
        let gs_ok = self.ground_speed.map_or( true, |gs| gs.get::<knot>() <= MAX_VALID_GROUND_SPEED_KT);
        let vs_ok = self.vertical_speed.map_or( true, |vs| vs.get::<foot_per_minute>().abs() <= MAX_VALID_VERTICAL_SPEED_FPM);
        gs_ok && vs_ok
    }
}

impl TrafficContact for TrackedContact {
    fn id (&self)->ContactId { self.id }

    fn predict (&self, sim_time: SimTime)->GeoPos {
        match (self.ground_speed, self.ground_track) {
            (Some(gs), Some(track)) => {
                let dt = sim_time.secs_since( self.last_contact_time);
                let dist = gs.get::<meter_per_second>() * dt;
                let dalt = self.vertical_speed.map_or( 0.0, |vs| vs.get::<meter_per_second>() * dt);
                self.last_position.offset( track, dist, dalt)
            }
            _ => GeoPos::nan()
        }
    }

    fn last_position (&self)->GeoPos { self.last_position }
    fn last_contact_time (&self)->SimTime { self.last_contact_time }
    fn ground_track (&self)->Option<f64> { self.ground_track }
    fn ground_speed (&self)->Option<Velocity> { self.ground_speed }
    fn vertical_speed (&self)->Option<Velocity> { self.vertical_speed }
}

/// the live traffic picture. Updated from external reports, queried by TCAS
pub struct TrafficStore {
    contacts: HashMap<ContactId,TrackedContact>,
    reset_after: Duration,
}

impl TrafficStore {
    pub fn new (reset_after: Duration)->Self {
        TrafficStore { contacts: HashMap::new(), reset_after }
    }

    pub fn len (&self)->usize { self.contacts.len() }
    pub fn is_empty (&self)->bool { self.contacts.is_empty() }

    /// add or update a contact. Returns true if the contact is new, in which case the caller has to notify TCAS
    pub fn update_contact (&mut self, id: ContactId, report: &ContactReport, sim_time: SimTime)->bool {
        if let Some(contact) = self.contacts.get_mut( &id) {
            contact.update( report, sim_time);
            false
        } else {
            self.contacts.insert( id, TrackedContact::new( id, report, sim_time, self.reset_after));
            true
        }
    }

    pub fn remove (&mut self, id: ContactId)->Option<TrackedContact> {
        self.contacts.remove( &id)
    }

    /// drop all contacts that have not been updated for `drop_after` and return their ids
    pub fn remove_stale (&mut self, sim_time: SimTime, drop_after: Duration)->Vec<ContactId> {
        let max_age = drop_after.as_secs_f64();
        let dropped: Vec<ContactId> = self.contacts.values()
            .filter( |c| sim_time.secs_since( c.last_contact_time).abs() >= max_age)
            .map( |c| c.id)
            .collect();

        for id in &dropped {
            self.contacts.remove( id);
        }
        if !dropped.is_empty() { trace!("dropped {} stale contacts", dropped.len()); }
        dropped
    }
}

impl ContactSource for TrafficStore {
    fn contact (&self, id: ContactId)->Option<&dyn TrafficContact> {
        self.contacts.get( &id).map( |c| c as &dyn TrafficContact)
    }

    fn contact_ids (&self)->Vec<ContactId> {
        let mut ids: Vec<ContactId> = self.contacts.keys().cloned().collect();
        ids.sort(); // deterministic init order
        ids
    }
}
