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

use std::cmp::Ordering;
use crate::intruder::Intruder;

/// threat order of intruders (most threatening first):
///  - intruders with valid predictions before the ones without
///  - intruders predicted to violate the protected zone at TCA before the ones that are not
///  - violators are ordered by TCA then by norm, non-violators by norm then by TCA
///
/// Intruders without prediction are all equal. Keys are compared with `total_cmp` so that the order stays total
/// even if a degenerate protected zone produces a NaN norm
pub fn compare_threat (a: &Intruder, b: &Intruder)->Ordering {
    match (a.is_prediction_valid(), b.is_prediction_valid()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
        (true, true) => {
            match (a.is_inside_zone(), b.is_inside_zone()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (true, true) => a.tca_secs().total_cmp( &b.tca_secs())
                                    .then_with( || a.tca_norm().total_cmp( &b.tca_norm())),
                (false, false) => a.tca_norm().total_cmp( &b.tca_norm())
                                    .then_with( || a.tca_secs().total_cmp( &b.tca_secs())),
            }
        }
    }
}

/// sort intruders by decreasing threat. The sort is stable, i.e. equal intruders keep their relative order
pub fn rank_intruders (intruders: &mut [Intruder]) {
    intruders.sort_by( compare_threat);
}

pub fn is_ranked (intruders: &[Intruder])->bool {
    intruders.windows(2).all( |w| compare_threat( &w[0], &w[1]) != Ordering::Greater)
}
