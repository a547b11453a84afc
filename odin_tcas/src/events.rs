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

use serde::{Serialize,Deserialize};
use crate::{intruder::IntruderSnapshot, scheduler::OperatingMode};

/// notifications published by TCAS
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum TcasEvent {
    OperatingModeChanged(OperatingMode),
    IntruderAdded(IntruderSnapshot),
    IntruderAlertChanged(IntruderSnapshot),
    IntruderRemoved(IntruderSnapshot),
}

impl TcasEvent {
    pub fn intruder (&self)->Option<&IntruderSnapshot> {
        match self {
            TcasEvent::OperatingModeChanged(_) => None,
            TcasEvent::IntruderAdded(s) | TcasEvent::IntruderAlertChanged(s) | TcasEvent::IntruderRemoved(s) => Some(s)
        }
    }
}

pub type TcasListener = Box<dyn FnMut(&TcasEvent)>;
