//! Exploration of implicitly given graphs.
//!
//! A graph is given by a set of initial nodes and a successor function; a
//! `Search` enumerates its nodes in the order dictated by an `Agenda`.

pub mod agenda;
pub mod search;

pub use crate::agenda::{Agenda, Frontier};
pub use crate::search::{Search, Uniques};
