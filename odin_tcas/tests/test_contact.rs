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
use uom::si::{f64::Velocity, velocity::{knot,meter_per_second}};
use odin_tcas::{
    clock::SimTime,
    contact::{ContactId, ContactReport, ContactSource, TrackedContact, TrafficContact, TrafficStore},
    geo::GeoPos,
};

/// contact tracking and dead reckoning tests
/// run with "cargo test --test test_contact -- --nocapture"

fn approx (a: f64, b: f64, eps: f64)->bool { (a - b).abs() <= eps }

fn secs (t: f64)->SimTime { SimTime::from_secs_f64(t) }

#[test]
fn test_derived_kinematics () {
    let p0 = GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.0, 1000.0);
    let mut c = TrackedContact::new( ContactId(1), &ContactReport::position(p0), secs(0.0), Duration::from_secs(10));
    assert!( c.ground_speed().is_none());
    assert!( c.predict( secs(1.0)).is_nan());

    let p1 = p0.offset( 90.0, 1000.0, 50.0);
    c.update( &ContactReport::position(p1), secs(10.0));
    let gs = c.ground_speed().unwrap().get::<meter_per_second>();
    let trk = c.ground_track().unwrap();
    let vs = c.vertical_speed().unwrap().get::<meter_per_second>();
    println!("derived gs={gs:.2}m/s trk={trk:.2} vs={vs:.2}m/s");
    assert!( approx( gs, 100.0, 1e-3));
    assert!( approx( trk, 90.0, 1e-3));
    assert!( approx( vs, 5.0, 1e-9));
    assert_eq!( c.last_contact_time(), secs(10.0));

    // dead reckoning
    let p = c.predict( secs(20.0));
    println!("predicted: {p}");
    assert!( approx( p1.distance_to( &p), 1000.0, 0.1));
    assert!( approx( p.alt, p1.alt + 50.0, 1e-6));

    // moves below 10m keep the previous track
    let p2 = p1.offset( 0.0, 5.0, 0.0);
    c.update( &ContactReport::position(p2), secs(11.0));
    assert!( approx( c.ground_track().unwrap(), trk, 1e-9));
    assert!( approx( c.ground_speed().unwrap().get::<meter_per_second>(), 5.0, 1e-3));
}

#[test]
fn test_reported_velocity () {
    let p0 = GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.0, 1000.0);
    let report = ContactReport::with_velocity( p0, -90.0, Velocity::new::<knot>(120.0), Velocity::new::<meter_per_second>(0.0));
    let c = TrackedContact::new( ContactId(2), &report, secs(0.0), Duration::from_secs(10));

    assert_eq!( c.ground_track(), Some(270.0));
    assert!( approx( c.ground_speed().unwrap().get::<knot>(), 120.0, 1e-9));
    assert!( !c.predict( secs(5.0)).is_nan());
}

#[test]
fn test_resets () {
    let p0 = GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.0, 1000.0);
    let mut c = TrackedContact::new( ContactId(3), &ContactReport::position(p0), secs(0.0), Duration::from_secs(10));

    let p1 = p0.offset( 0.0, 1000.0, 0.0);
    c.update( &ContactReport::position(p1), secs(10.0));
    assert!( c.ground_speed().is_some());

    // implausible jump
    let p2 = p1.offset( 0.0, 100_000.0, 0.0);
    c.update( &ContactReport::position(p2), secs(11.0));
    println!("after jump: gs={:?}", c.ground_speed());
    assert!( c.ground_speed().is_none());
    assert!( c.ground_track().is_none());
    assert!( c.predict( secs(12.0)).is_nan());
    assert_eq!( c.last_position(), p2);

    // report gap exceeds reset interval
    let p3 = p2.offset( 0.0, 1000.0, 0.0);
    c.update( &ContactReport::position(p3), secs(15.0));
    assert!( c.ground_speed().is_some());
    let p4 = p3.offset( 0.0, 1000.0, 0.0);
    c.update( &ContactReport::position(p4), secs(30.0));
    assert!( c.ground_speed().is_none());

    // time reversal
    let p5 = p4.offset( 0.0, 1000.0, 0.0);
    c.update( &ContactReport::position(p5), secs(35.0));
    assert!( c.ground_speed().is_some());
    c.update( &ContactReport::position(p5), secs(20.0));
    assert!( c.ground_speed().is_none());
    assert_eq!( c.last_contact_time(), secs(20.0));
}

#[test]
fn test_store () {
    let p0 = GeoPos::from_lon_lat_degrees_alt_meters( -122.0, 37.0, 1000.0);
    let mut store = TrafficStore::new( Duration::from_secs(10));

    assert!( store.update_contact( ContactId(7), &ContactReport::position(p0), secs(0.0)));
    assert!( store.update_contact( ContactId(3), &ContactReport::position(p0), secs(20.0)));
    assert!( !store.update_contact( ContactId(7), &ContactReport::position(p0.offset( 0.0, 500.0, 0.0)), secs(5.0)));
    assert_eq!( store.len(), 2);
    assert_eq!( store.contact_ids(), vec![ContactId(3), ContactId(7)]);
    assert!( store.contact( ContactId(7)).is_some());
    assert!( store.contact( ContactId(8)).is_none());

    let dropped = store.remove_stale( secs(25.0), Duration::from_secs(10));
    println!("dropped: {dropped:?}");
    assert_eq!( dropped, vec![ContactId(7)]);
    assert_eq!( store.contact_ids(), vec![ContactId(3)]);

    assert!( store.remove( ContactId(3)).is_some());
    assert!( store.is_empty());
}
