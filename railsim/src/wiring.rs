//! Wiring Graph
//!
//! Point-to-point wires between terminals. Each wire stores a start/end
//! orientation for bookkeeping, but the graph is undirected for traversal:
//! [`WiringGraph::neighbors`] matches either endpoint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::RailSimError;
use crate::pin::{Owner, PinRef};

pub type WireId = Uuid;

/// A cosmetic routing point on the canvas. Not part of the electrical model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint(pub f64, pub f64);

/// A wire between two distinct terminals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub start: PinRef,
    pub end: PinRef,
    #[serde(default)]
    pub route: Vec<RoutePoint>,
}

impl Wire {
    /// The endpoint opposite `pin`, if the wire touches it.
    pub fn other_end(&self, pin: &PinRef) -> Option<&PinRef> {
        if self.start.same_terminal(pin) {
            Some(&self.end)
        } else if self.end.same_terminal(pin) {
            Some(&self.start)
        } else {
            None
        }
    }

    pub fn touches_owner(&self, owner: &Owner) -> bool {
        self.start.owner == *owner || self.end.owner == *owner
    }
}

/// The set of wires in a session.
#[derive(Debug, Clone, Default)]
pub struct WiringGraph {
    wires: Vec<Wire>,
}

impl WiringGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, start: PinRef, end: PinRef) -> Result<WireId, RailSimError> {
        self.connect_routed(start, end, Vec::new())
    }

    pub fn connect_routed(
        &mut self,
        start: PinRef,
        end: PinRef,
        route: Vec<RoutePoint>,
    ) -> Result<WireId, RailSimError> {
        if start.same_terminal(&end) {
            return Err(RailSimError::SelfLoop(start.to_string()));
        }
        let id = Uuid::new_v4();
        tracing::trace!("Wire {} connects {} to {}", id, start, end);
        self.wires.push(Wire {
            id,
            start,
            end,
            route,
        });
        Ok(id)
    }

    pub fn disconnect(&mut self, id: WireId) -> Option<Wire> {
        let index = self.wires.iter().position(|w| w.id == id)?;
        Some(self.wires.remove(index))
    }

    /// Drop every wire touching `owner`; returns how many were removed.
    pub fn remove_owner(&mut self, owner: &Owner) -> usize {
        let before = self.wires.len();
        self.wires.retain(|w| !w.touches_owner(owner));
        before - self.wires.len()
    }

    /// Terminals directly wired to `pin`, one entry per wire.
    pub fn neighbors(&self, pin: &PinRef) -> Vec<PinRef> {
        self.wires
            .iter()
            .filter_map(|wire| wire.other_end(pin))
            .cloned()
            .collect()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }

    pub fn get(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}
