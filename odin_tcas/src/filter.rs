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

use crate::intruder::Intruder;

/// changes of the working set membership in one refresh, as indices into the ranked intruder slice
#[derive(Debug,Default)]
pub struct WorkingSetDelta {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
}

impl WorkingSetDelta {
    pub fn is_empty (&self)->bool { self.added.is_empty() && self.removed.is_empty() }
}

/// the capacity bounded set of intruders that get classified and reported.
/// Since intruders without valid prediction are ranked last, members always form a prefix of the ranked intruders,
/// which is why we only have to keep its length
#[derive(Debug,Clone)]
pub struct WorkingSet {
    max_count: usize,
    len: usize,
}

impl WorkingSet {
    pub fn new (max_count: usize)->Self {
        WorkingSet { max_count, len: 0 }
    }

    pub fn max_count (&self)->usize { self.max_count }
    pub fn len (&self)->usize { self.len }
    pub fn is_empty (&self)->bool { self.len == 0 }

    /// recompute membership for freshly ranked intruders: a member has a rank below `max_count` and a valid prediction
    pub fn refresh (&mut self, ranked: &mut [Intruder])->WorkingSetDelta {
        let mut delta = WorkingSetDelta::default();
        let mut len = 0;

        for (i,intruder) in ranked.iter_mut().enumerate() {
            let is_member = i < self.max_count && intruder.is_prediction_valid();
            if is_member {
                len += 1;
                if !intruder.is_filtered { delta.added.push(i); }
            } else if intruder.is_filtered {
                delta.removed.push(i);
            }
            intruder.is_filtered = is_member;
        }

        self.len = len;
        delta
    }

    /// account for the removal of the intruder at `idx` from the ranked intruders
    pub fn remove_at (&mut self, idx: usize) {
        if idx < self.len {
            self.len -= 1;
        }
    }

    pub fn members<'a> (&self, ranked: &'a [Intruder])->&'a [Intruder] {
        &ranked[..self.len.min( ranked.len())]
    }
}
