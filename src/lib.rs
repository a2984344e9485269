// SPDX-License-Identifier: MIT

//! Turns natural-language process descriptions into BPMN element graphs.

pub mod error;
pub mod nlp;
pub mod process;
pub mod server;
