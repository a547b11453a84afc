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

//! geodetic support for the local TCAS frame.
//! The frame is an east/north/up Euclidean approximation around the own airplane: the horizontal axes are an
//! equirectangular projection built from great circle distance and true bearing, the vertical axis is the
//! altitude difference. All vectors are in meters (position) or meters per second (velocity). The frame
//! is recomputed from scratch on every update, there is no incremental integration.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Bearing, Destination, Distance, Haversine, Point};
use nalgebra::Vector3;
use uom::si::{f64::{Length,Velocity}, length::{meter,foot}, velocity::meter_per_second};

pub type Vec3 = Vector3<f64>;

#[inline] pub fn nan_vec3 ()->Vec3 { Vec3::repeat( f64::NAN) }

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// a geodetic position given as longitude/latitude degrees and altitude in meters
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64
}

impl GeoPos {
    pub fn from_lon_lat_degrees_alt_meters (lon: f64, lat: f64, alt: f64)->Self {
        GeoPos { lon, lat, alt }
    }

    pub fn from_lon_lat_degrees_alt (lon: f64, lat: f64, alt: Length)->Self {
        GeoPos { lon, lat, alt: alt.get::<meter>() }
    }

    pub fn nan ()->Self { GeoPos { lon: f64::NAN, lat: f64::NAN, alt: f64::NAN } }

    #[inline] pub fn point (&self)->Point { Point::new( self.lon, self.lat) }
    #[inline] pub fn altitude (&self)->Length { Length::new::<meter>( self.alt) }

    pub fn is_nan (&self)->bool { self.lon.is_nan() || self.lat.is_nan() || self.alt.is_nan() }

    pub fn same_location (&self, other: &GeoPos)->bool { self.lon == other.lon && self.lat == other.lat }

    /// great circle distance in meters (ignoring altitude)
    pub fn distance_to (&self, other: &GeoPos)->f64 {
        Haversine.distance( self.point(), other.point())
    }

    /// initial true bearing in degrees [0..360) from self towards other
    pub fn bearing_to (&self, other: &GeoPos)->f64 {
        normalize_360( Haversine.bearing( self.point(), other.point()))
    }

    /// the position reached by moving `dist` meters along true bearing `bearing_deg`, and `dalt` meters vertically
    pub fn offset (&self, bearing_deg: f64, dist: f64, dalt: f64)->GeoPos {
        let p = Haversine.destination( self.point(), bearing_deg, dist);
        GeoPos { lon: p.x(), lat: p.y(), alt: self.alt + dalt }
    }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5},{:.0}ft]", self.lon, self.lat, Length::new::<meter>(self.alt).get::<foot>())
    }
}

/// east and north components of a polar quantity given by magnitude and true bearing in degrees.
/// True bearings are clockwise from north, hence the conversion to a counter clockwise angle from east
#[inline]
pub fn polar_to_east_north (magnitude: f64, bearing_deg: f64)->(f64,f64) {
    let theta = (90.0 - bearing_deg).to_radians();
    (magnitude * theta.cos(), magnitude * theta.sin())
}

/// local frame position of `pos` relative to `origin` (the own airplane)
pub fn position_vector (origin: &GeoPos, pos: &GeoPos)->Vec3 {
    if pos.same_location(origin) {
        return Vec3::new( 0.0, 0.0, pos.alt - origin.alt)
    }

    let d = origin.distance_to( pos);
    let bearing = origin.bearing_to( pos);
    let (x,y) = polar_to_east_north( d, bearing);
    Vec3::new( x, y, pos.alt - origin.alt)
}

/// local frame velocity for given ground speed, true ground track (degrees) and vertical speed
pub fn velocity_vector (ground_speed: Velocity, ground_track_deg: f64, vertical_speed: Velocity)->Vec3 {
    let (vx,vy) = polar_to_east_north( ground_speed.get::<meter_per_second>(), ground_track_deg);
    Vec3::new( vx, vy, vertical_speed.get::<meter_per_second>())
}

#[inline] pub fn horizontal_length (v: &Vec3)->f64 { v.x.hypot( v.y) }
#[inline] pub fn vertical_length (v: &Vec3)->f64 { v.z.abs() }
