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

//! traffic collision prediction core: dead-reckons tracked contacts into an ownship centered frame,
//! computes the time of closest approach against a protected cylinder, ranks intruders by threat and
//! keeps a capacity bounded set of alerted intruders that get classified on each update

use std::fmt;
use uom::si::{f64::{Length,Velocity}, length::foot};
use tracing::{debug,info,warn,trace};

pub mod errors;
pub mod geo;
pub mod tca;
pub mod clock;
pub mod contact;
pub mod ownship;
pub mod intruder;
pub mod sensitivity;
pub mod advisory;
pub mod scheduler;
pub mod ranking;
pub mod filter;
pub mod events;
pub mod config;

use crate::{
    errors::{OdinTcasError,Result},
    advisory::{AlertClassifier, AlertLevel, ClassifierContext},
    clock::{SimTime, SystemClock, WallClock},
    config::TcasConfig,
    contact::{ContactId, ContactSource},
    events::{TcasEvent, TcasListener},
    filter::WorkingSet,
    intruder::Intruder,
    ownship::{Ownship, OwnshipTelemetry},
    ranking::rank_intruders,
    scheduler::{GroundModeAutomation, OperatingMode, UpdateScheduler},
    sensitivity::{FlightPhase, Sensitivity, SensitivityContext, SensitivityParams},
};

pub struct Tcas {
    sensitivity: Box<dyn Sensitivity>,
    classifier: Box<dyn AlertClassifier>,
    clock: Box<dyn WallClock>,

    scheduler: UpdateScheduler,
    automation: Option<GroundModeAutomation>,
    mode: OperatingMode,
    min_ground_speed: Velocity,

    telemetry: OwnshipTelemetry, // latest sample, applied on the next update
    flight_phase: FlightPhase,
    radar_altitude: Option<Length>,
    ownship: Ownship,

    intruders: Vec<Intruder>, // ranked, filtered members first
    working_set: WorkingSet,

    listeners: Vec<TcasListener>,
    is_initialized: bool,
    sim_time: SimTime,
}

impl Tcas {
    pub fn new (config: &TcasConfig, sensitivity: Box<dyn Sensitivity>, classifier: Box<dyn AlertClassifier>,
                clock: Box<dyn WallClock>)->Result<Self> {
        config.validate()?;

        Ok( Tcas {
            sensitivity,
            classifier,
            clock,
            scheduler: config.create_scheduler(),
            automation: config.create_ground_automation(),
            mode: OperatingMode::Standby,
            min_ground_speed: config.min_ground_speed(),
            telemetry: OwnshipTelemetry::default(),
            flight_phase: FlightPhase::default(),
            radar_altitude: None,
            ownship: Ownship::new(),
            intruders: Vec::new(),
            working_set: WorkingSet::new( config.max_intruders),
            listeners: Vec::new(),
            is_initialized: false,
            sim_time: SimTime::default(),
        })
    }

    /// the configured altitude banded sensitivity and traffic advisory classifier, using the system clock
    pub fn from_config (config: &TcasConfig)->Result<Self> {
        Self::new( config, Box::new( config.create_sensitivity()), Box::new( config.create_classifier()), Box::new( SystemClock))
    }

    /// start tracking all contacts that are currently known by `contacts`
    pub fn init (&mut self, contacts: &dyn ContactSource) {
        for id in contacts.contact_ids() {
            self.on_contact_added( id);
        }
        self.is_initialized = true;
        debug!("TCAS initialized with {} intruders", self.intruders.len());
    }

    pub fn is_initialized (&self)->bool { self.is_initialized }

    pub fn subscribe<F> (&mut self, listener: F) where F: FnMut(&TcasEvent) + 'static {
        self.listeners.push( Box::new(listener));
    }

    fn notify (listeners: &mut [TcasListener], event: TcasEvent) {
        for listener in listeners.iter_mut() {
            listener( &event);
        }
    }

    //--- operating mode

    pub fn operating_mode (&self)->OperatingMode { self.mode }

    /// explicit mode selection, which also cancels any pending automatic mode change
    pub fn set_operating_mode (&mut self, mode: OperatingMode) {
        if let Some(automation) = &mut self.automation {
            automation.cancel();
        }
        self.apply_operating_mode( mode);
    }

    fn apply_operating_mode (&mut self, mode: OperatingMode) {
        if mode != self.mode {
            info!("TCAS mode changed from {} to {}", self.mode, mode);
            self.mode = mode;
            Self::notify( &mut self.listeners, TcasEvent::OperatingModeChanged(mode));
        }
    }

    pub fn pending_mode_change (&self)->Option<(SimTime,OperatingMode)> {
        self.automation.as_ref().and_then( |a| a.pending())
    }

    //--- ownship

    pub fn set_ownship_telemetry (&mut self, sample: OwnshipTelemetry) {
        self.telemetry = sample;
    }

    pub fn set_flight_phase (&mut self, phase: FlightPhase) { self.flight_phase = phase }

    pub fn set_radar_altitude (&mut self, radar_altitude: Option<Length>) { self.radar_altitude = radar_altitude }

    pub fn ownship (&self)->&Ownship { &self.ownship }

    //--- contact feed

    /// start tracking a new contact. Known contacts are ignored
    pub fn on_contact_added (&mut self, id: ContactId) {
        if self.intruders.iter().any( |i| i.id == id) {
            return
        }
        // new intruders have no prediction yet and hence rank last
        self.intruders.push( Intruder::new( id));
        trace!("tracking new contact {}", id);
    }

    /// drop a contact that disappeared from the feed, notifying removal if it was in the filtered set
    pub fn on_contact_removed (&mut self, id: ContactId)->Result<()> {
        let idx = self.intruders.iter().position( |i| i.id == id).ok_or( OdinTcasError::UnknownContact(id))?;
        let intruder = self.intruders.remove( idx);

        if intruder.is_filtered {
            self.working_set.remove_at( idx);
            self.classifier.intruder_removed( id);
            debug!("removed intruder {} (contact dropped)", id);
            Self::notify( &mut self.listeners, TcasEvent::IntruderRemoved( intruder.snapshot()));
        }
        Ok(())
    }

    //--- intruders

    /// the ranked, capacity bounded set of alerted intruders
    pub fn intruders (&self)->Result<&[Intruder]> {
        if self.is_initialized {
            Ok( self.working_set.members( &self.intruders))
        } else {
            Err( OdinTcasError::NotInitialized)
        }
    }

    /// all tracked intruders, in ranked order as of the last update
    pub fn all_intruders (&self)->&[Intruder] { &self.intruders }

    pub fn intruder (&self, id: ContactId)->Option<&Intruder> {
        self.intruders.iter().find( |i| i.id == id)
    }

    pub fn max_intruders (&self)->usize { self.working_set.max_count() }

    pub fn sensitivity_params (&self)->SensitivityParams { self.sensitivity.params() }

    pub fn last_update (&self)->SimTime { self.sim_time }

    //--- update cycle

    /// process a simulated time tick, returning true if it executed an update
    pub fn tick (&mut self, sim_time: SimTime, contacts: &dyn ContactSource)->Result<bool> {
        if !self.is_initialized {
            return Err( OdinTcasError::NotInitialized)
        }

        if let Some(automation) = &mut self.automation {
            automation.set_on_ground( self.telemetry.on_ground, sim_time, self.mode);
            if let Some(mode) = automation.poll( sim_time) {
                self.apply_operating_mode( mode);
            }
        }

        let wall_millis = self.clock.now_millis();
        if !self.scheduler.is_due( self.mode, sim_time, wall_millis) {
            return Ok(false)
        }

        self.update( sim_time, contacts)?;
        self.scheduler.record_update( sim_time, wall_millis);
        Ok(true)
    }

    fn update (&mut self, sim_time: SimTime, contacts: &dyn ContactSource)->Result<()> {
        self.sim_time = sim_time;

        let ctx = SensitivityContext {
            altitude: self.telemetry.altitude(),
            radar_altitude: self.radar_altitude,
            phase: self.flight_phase,
            on_ground: self.telemetry.on_ground,
        };
        self.sensitivity.update( &ctx);
        let params = self.sensitivity.params();

        self.ownship.update( sim_time, &self.telemetry);

        for intruder in self.intruders.iter_mut() {
            let contact = contacts.contact( intruder.id);
            if contact.is_none() {
                warn!("no contact for intruder {}", intruder.id);
            }
            intruder.update_prediction( sim_time, contact, &self.ownship, &params, self.min_ground_speed);
        }

        rank_intruders( &mut self.intruders);
        self.update_working_set();

        for idx in 0..self.working_set.len() {
            self.classify_at( idx, &params)?;
        }
        Ok(())
    }

    fn update_working_set (&mut self) {
        let delta = self.working_set.refresh( &mut self.intruders);

        for idx in delta.removed {
            let intruder = &mut self.intruders[idx];
            debug!("removed intruder {}", intruder.id);
            self.classifier.intruder_removed( intruder.id);
            Self::notify( &mut self.listeners, TcasEvent::IntruderRemoved( intruder.snapshot()));
            intruder.alert_level = AlertLevel::None;
        }

        for idx in delta.added {
            let intruder = &self.intruders[idx];
            debug!("added intruder {}", intruder.id);
            Self::notify( &mut self.listeners, TcasEvent::IntruderAdded( intruder.snapshot()));
        }
    }

    fn classify_at (&mut self, idx: usize, params: &SensitivityParams)->Result<()> {
        let intruder = &self.intruders[idx];
        if !intruder.is_filtered {
            return Err( OdinTcasError::NotFiltered( intruder.id))
        }

        let ctx = ClassifierContext { sim_time: self.sim_time, mode: self.mode, ownship: &self.ownship, sensitivity: params };
        let mut level = self.classifier.classify( &ctx, intruder);
        if self.mode == OperatingMode::TrafficAdvisoryOnly && level > AlertLevel::TrafficAdvisory {
            level = AlertLevel::TrafficAdvisory;
        }

        let intruder = &mut self.intruders[idx];
        if level != intruder.alert_level {
            info!("intruder {} alert level changed from {:?} to {:?}", intruder.id, intruder.alert_level, level);
            intruder.alert_level = level;
            Self::notify( &mut self.listeners, TcasEvent::IntruderAlertChanged( intruder.snapshot()));
        }
        Ok(())
    }
}

impl fmt::Display for Tcas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TCAS( mode: {}, intruders: {}/{}, filtered: {} )", self.mode, self.intruders.len(),
                self.working_set.max_count(), self.working_set.len())
    }
}
