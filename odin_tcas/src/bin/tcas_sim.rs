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

use std::{rc::Rc, time::Duration};
use anyhow::Result;
use structopt::StructOpt;
use lazy_static::lazy_static;
use tracing_subscriber::EnvFilter;
use uom::si::{f64::{Length,Velocity}, length::nautical_mile, velocity::{knot,foot_per_minute}};

use odin_tcas::{
    Tcas,
    clock::{ManualClock, SimTime},
    config::{TcasConfig, load_config},
    contact::{ContactId, ContactReport, TrafficStore},
    events::TcasEvent,
    geo::GeoPos,
    ownship::OwnshipTelemetry,
    scheduler::OperatingMode,
};

#[derive(StructOpt)]
#[structopt(about="run a synthetic converging traffic scenario through TCAS and print its notifications as JSON")]
struct CliOpts {
    #[structopt(long,help="RON config file (defaults to built-in TAS config)")]
    config: Option<String>,

    #[structopt(long,help="number of converging contacts",default_value="8")]
    contacts: u32,

    #[structopt(long,help="number of simulated 1s ticks",default_value="120")]
    ticks: u32,

    #[structopt(long,help="log at debug level unless RUST_LOG is set")]
    verbose: bool,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::from_args(); }

const RING_RADIUS_NM: f64 = 10.0;
const REPORT_GAP: Duration = Duration::from_secs(10);
const PASSED_MARGIN_NM: f64 = 2.0; // contacts stop reporting this far past the ring center

/// a constant velocity contact on a ring around the ownship start position, heading towards its center
struct SyntheticContact {
    id: ContactId,
    start: GeoPos,
    ground_track: f64,
    ground_speed: Velocity,
    vertical_speed: Velocity,
}

impl SyntheticContact {
    fn report (&self, t: f64)->ContactReport {
        let gs = self.ground_speed.value; // m/s
        let vs = self.vertical_speed.value;
        let pos = self.start.offset( self.ground_track, gs * t, vs * t);
        ContactReport::with_velocity( pos, self.ground_track, self.ground_speed, self.vertical_speed)
    }

    fn has_passed (&self, t: f64)->bool {
        let dist = Length::new::<nautical_mile>( RING_RADIUS_NM + PASSED_MARGIN_NM).value;
        t * self.ground_speed.value > dist
    }
}

fn create_ring (center: &GeoPos, n: u32)->Vec<SyntheticContact> {
    let radius = Length::new::<nautical_mile>( RING_RADIUS_NM).value;
    (0..n).map( |i| {
        let bearing = 360.0 * i as f64 / n as f64;
        let dalt = if i % 3 == 0 { 0.0 } else { 300.0 * (i % 3) as f64 }; // some co-altitude, some above
        let start = center.offset( bearing, radius, dalt);
        SyntheticContact {
            id: ContactId(i + 1),
            start,
            ground_track: (bearing + 180.0) % 360.0,
            ground_speed: Velocity::new::<knot>( 150.0 + 10.0 * i as f64),
            vertical_speed: Velocity::new::<foot_per_minute>( if dalt > 0.0 { -500.0 } else { 0.0 }),
        }
    }).collect()
}

fn main()->Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else( |_| EnvFilter::new( if ARGS.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter( filter).init();

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => TcasConfig::default()
    };

    let clock = Rc::new( ManualClock::new(0));
    let mut tcas = Tcas::new( &config, Box::new( config.create_sensitivity()), Box::new( config.create_classifier()), Box::new( clock.clone()))?;
    tcas.subscribe( |e: &TcasEvent| {
        match serde_json::to_string( e) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("failed to serialize event: {err}")
        }
    });

    let center = GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.5, 1500.0);
    let synthetic = create_ring( &center, ARGS.contacts);
    let mut store = TrafficStore::new( REPORT_GAP);
    for c in &synthetic {
        store.update_contact( c.id, &c.report( 0.0), SimTime::default());
    }

    tcas.init( &store);
    tcas.set_operating_mode( OperatingMode::TrafficAdvisoryOnly);

    let own_gs = Velocity::new::<knot>( 100.0);
    for tick in 1..=ARGS.ticks {
        let t = tick as f64;
        let sim_time = SimTime::from_secs_f64( t);
        clock.advance( Duration::from_secs(1));

        let own_pos = center.offset( 0.0, own_gs.value * t, 0.0);
        tcas.set_ownship_telemetry( OwnshipTelemetry::new( own_pos, 0.0, own_gs, Velocity::new::<knot>(0.0)));

        for c in synthetic.iter().filter( |c| !c.has_passed( t)) {
            if store.update_contact( c.id, &c.report( t), sim_time) {
                tcas.on_contact_added( c.id);
            }
        }
        for id in store.remove_stale( sim_time, REPORT_GAP) {
            tcas.on_contact_removed( id)?;
        }
        tcas.tick( sim_time, &store)?;
    }

    println!("{tcas}");
    for intruder in tcas.intruders()? {
        println!("  {intruder}");
    }
    Ok(())
}
