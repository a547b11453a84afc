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

//! time of closest approach (TCA) between the own airplane and an intruder.
//!
//! Closest approach is measured with the cylindrical norm of the relative displacement vector, i.e.
//! separation is scaled by the dimensions of the protected zone (an upright cylinder around the own airplane).
//! A norm <= 1 means the displacement lies inside the protected zone.
//!
//! The norm over time is the maximum of a vertical and a horizontal component that are both convex in `t`,
//! hence its minimum is either at a stationary point of one of the components or at a point where both
//! components are equal. We enumerate these candidates in closed form instead of iterating, see
//!   Munoz, C.A. and Narkawicz, A.J. "Time of Closest Approach in Three-Dimensional Airspace", NASA/TM-2010-216857

use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::meter};
use crate::geo::{Vec3, nan_vec3, horizontal_length, vertical_length};

/// the protected zone around the own airplane (meters)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct ProtectedZone {
    pub radius: f64,
    pub half_height: f64
}

impl ProtectedZone {
    pub fn new (radius: Length, half_height: Length)->Self {
        ProtectedZone { radius: radius.get::<meter>(), half_height: half_height.get::<meter>() }
    }

    pub fn from_meters (radius: f64, half_height: f64)->Self {
        ProtectedZone { radius, half_height }
    }
}

/// cylindrical norm of displacement `d` with respect to the protected zone
#[inline]
pub fn cylindrical_norm (d: &Vec3, zone: &ProtectedZone)->f64 {
    (vertical_length(d) / zone.half_height).max( horizontal_length(d) / zone.radius)
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TcaSolution {
    pub tca: f64,          // seconds from now
    pub displacement: Vec3, // relative position at tca
    pub norm: f64          // cylindrical norm of displacement
}

impl TcaSolution {
    pub fn nan ()->Self {
        TcaSolution { tca: f64::NAN, displacement: nan_vec3(), norm: f64::NAN }
    }

    /// the solution for relative position `s` and velocity `v` at time `t`
    pub fn at (t: f64, s: &Vec3, v: &Vec3, zone: &ProtectedZone)->Self {
        let displacement = s + v * t;
        let norm = cylindrical_norm( &displacement, zone);
        TcaSolution { tca: t, displacement, norm }
    }

    #[inline] pub fn horizontal_separation (&self)->f64 { horizontal_length( &self.displacement) }
    #[inline] pub fn vertical_separation (&self)->f64 { vertical_length( &self.displacement) }

    #[inline] pub fn is_inside_zone (&self)->bool { self.norm <= 1.0 }
}

// replace `best` if the candidate at `t` has a strictly smaller norm. Earlier candidates win ties
fn evaluate_candidate (best: &mut TcaSolution, t: f64, s: &Vec3, v: &Vec3, zone: &ProtectedZone) {
    if t > 0.0 {
        let candidate = TcaSolution::at( t, s, v, zone);
        if candidate.norm < best.norm {
            *best = candidate;
        }
    }
}

/// compute the closest approach for relative position `s` (m) and relative velocity `v` (m/s) within
/// `lookahead` seconds. If the closest approach is beyond the lookahead time the solution is clamped to
/// `lookahead`, i.e. the reported norm is the one at the horizon and not the true minimum
pub fn solve_tca (s: &Vec3, v: &Vec3, zone: &ProtectedZone, lookahead: f64)->TcaSolution {
    let h2 = zone.half_height * zone.half_height;
    let r2 = zone.radius * zone.radius;

    let v_horiz2 = v.x*v.x + v.y*v.y;
    let s_horiz2 = s.x*s.x + s.y*s.y;
    let sv_horiz = s.x*v.x + s.y*v.y;

    // crossover quadratic: vertical and horizontal norm components are equal
    let a = (v.z*v.z) / h2 - v_horiz2 / r2;
    let b = 2.0 * s.z * v.z / h2 - 2.0 * sv_horiz / r2;
    let c = (s.z*s.z) / h2 - s_horiz2 / r2;

    let mut best = TcaSolution::at( 0.0, s, v, zone);

    if v_horiz2 != 0.0 { // minimum horizontal separation
        evaluate_candidate( &mut best, -sv_horiz / v_horiz2, s, v, zone);
    }

    if v.z != 0.0 { // vertical separation crosses zero
        evaluate_candidate( &mut best, -s.z / v.z, s, v, zone);
    }

    let discriminant = b*b - 4.0*a*c;
    if a != 0.0 && discriminant >= 0.0 {
        let sqrt = discriminant.sqrt();
        evaluate_candidate( &mut best, (-b + sqrt) / (2.0 * a), s, v, zone);
        evaluate_candidate( &mut best, (-b - sqrt) / (2.0 * a), s, v, zone);
    } else if a == 0.0 && b != 0.0 {
        evaluate_candidate( &mut best, -c / b, s, v, zone);
    }

    if best.tca > lookahead {
        best = TcaSolution::at( lookahead, s, v, zone);
    }

    best
}
