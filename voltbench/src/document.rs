//! Circuit document model.
//!
//! A [`CircuitDocument`] is the single mutable value everything else operates
//! on: two-terminal components in declaration order, explicit wires, and the
//! implicit junctions created by wiring through empty grid points. Every
//! mutation bumps the document revision, which is the snapshot identifier
//! solve results are tagged with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::CircuitError;

/// Kind of a two-terminal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Resistor,
    VoltageSource,
    CurrentSource,
    Capacitor,
    Inductor,
    Diode,
}

impl ComponentKind {
    /// One-letter SPICE-style prefix, also used for auto-generated ids.
    pub fn prefix(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "R",
            ComponentKind::VoltageSource => "V",
            ComponentKind::CurrentSource => "I",
            ComponentKind::Capacitor => "C",
            ComponentKind::Inductor => "L",
            ComponentKind::Diode => "D",
        }
    }

    /// Fallback value used when a component has no (finite) value.
    pub fn default_value(&self) -> f64 {
        match self {
            ComponentKind::Resistor => 1000.0,
            ComponentKind::VoltageSource => 5.0,
            ComponentKind::CurrentSource => 0.001,
            ComponentKind::Capacitor => 1e-6,
            ComponentKind::Inductor => 1e-3,
            ComponentKind::Diode => 0.0,
        }
    }

    /// Voltage and current sources carry the `DC` keyword in netlist text.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            ComponentKind::VoltageSource | ComponentKind::CurrentSource
        )
    }
}

/// A snapped grid coordinate. Junctions are identified by these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of a component's two terminal slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    N1,
    N2,
}

impl Slot {
    /// Fixed visiting order: n1 before n2.
    pub const BOTH: [Slot; 2] = [Slot::N1, Slot::N2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::N1 => "n1",
            Slot::N2 => "n2",
        }
    }
}

/// Structural reference to a component terminal.
///
/// Used as a map key and an identity building block, so it is compared and
/// hashed structurally rather than through a concatenated string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalRef {
    pub component: String,
    pub slot: Slot,
}

impl TerminalRef {
    pub fn new(component: impl Into<String>, slot: Slot) -> Self {
        Self {
            component: component.into(),
            slot,
        }
    }
}

impl std::fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.component, self.slot.as_str())
    }
}

/// Either end of a wire: a component terminal or a free-standing junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Terminal(TerminalRef),
    Junction(GridPoint),
}

impl Endpoint {
    pub fn terminal(component: impl Into<String>, slot: Slot) -> Self {
        Endpoint::Terminal(TerminalRef::new(component, slot))
    }

    pub fn junction(x: i32, y: i32) -> Self {
        Endpoint::Junction(GridPoint::new(x, y))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Terminal(t) => write!(f, "{}", t),
            Endpoint::Junction(p) => write!(f, "{}", p),
        }
    }
}

/// State carried by one terminal slot.
///
/// `grounded` is a property consulted during resolution; it never overwrites
/// the user-visible label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terminal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub grounded: bool,
}

/// A placed two-terminal component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Unique id: kind prefix plus 1-based sequence, e.g. `R1`.
    pub id: String,
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub n1: Terminal,
    #[serde(default)]
    pub n2: Terminal,
}

impl Component {
    pub fn terminal(&self, slot: Slot) -> &Terminal {
        match slot {
            Slot::N1 => &self.n1,
            Slot::N2 => &self.n2,
        }
    }

    pub fn terminal_mut(&mut self, slot: Slot) -> &mut Terminal {
        match slot {
            Slot::N1 => &mut self.n1,
            Slot::N2 => &mut self.n2,
        }
    }

    /// The value used for emission: the stored value when finite, otherwise
    /// the kind's documented default. Never fails.
    pub fn effective_value(&self) -> f64 {
        self.value
            .filter(|v| v.is_finite())
            .unwrap_or_else(|| self.kind.default_value())
    }
}

/// Stable handle for deleting a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireId(pub Uuid);

impl WireId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// An explicit connection between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub a: Endpoint,
    pub b: Endpoint,
}

impl Wire {
    /// True if either end references the given component.
    pub fn touches_component(&self, id: &str) -> bool {
        let hits = |e: &Endpoint| matches!(e, Endpoint::Terminal(t) if t.component == id);
        hits(&self.a) || hits(&self.b)
    }

    fn touches_junction(&self, at: &GridPoint) -> bool {
        let hits = |e: &Endpoint| matches!(e, Endpoint::Junction(p) if p == at);
        hits(&self.a) || hits(&self.b)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Schema version for forward compatibility.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for DocumentMeta {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: "Untitled".to_string(),
            created: now,
            modified: now,
            schema_version: default_schema_version(),
        }
    }
}

/// The circuit document: the single source of truth for resolution, export,
/// simulation and probing. Collections are private so every mutation goes
/// through methods that bump the revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitDocument {
    pub meta: DocumentMeta,
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    wires: Vec<Wire>,
    #[serde(default)]
    junctions: Vec<GridPoint>,
    #[serde(default)]
    revision: u64,
}

impl CircuitDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: DocumentMeta {
                name: name.into(),
                ..DocumentMeta::default()
            },
            components: Vec::new(),
            wires: Vec::new(),
            junctions: Vec::new(),
            revision: 0,
        }
    }

    /// Snapshot identifier; increases with every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.meta.modified = Utc::now();
    }

    /// Components in declaration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Junctions in creation order.
    pub fn junctions(&self) -> &[GridPoint] {
        &self.junctions
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn terminal(&self, at: &TerminalRef) -> Option<&Terminal> {
        self.component(&at.component).map(|c| c.terminal(at.slot))
    }

    /// Place a component, auto-naming it from its kind prefix (`R1`, `R2`, …).
    pub fn add_component(&mut self, kind: ComponentKind, value: Option<f64>) -> String {
        let id = self.next_id(kind);
        self.components.push(Component {
            id: id.clone(),
            kind,
            value,
            n1: Terminal::default(),
            n2: Terminal::default(),
        });
        self.touch();
        id
    }

    fn next_id(&self, kind: ComponentKind) -> String {
        let prefix = kind.prefix();
        let max = self
            .components
            .iter()
            .filter_map(|c| c.id.strip_prefix(prefix))
            .filter_map(|rest| rest.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{}", prefix, max + 1)
    }

    /// Assign or clear a terminal's user label. Whitespace-only labels are
    /// treated as cleared.
    pub fn set_label(
        &mut self,
        at: &TerminalRef,
        label: Option<String>,
    ) -> Result<(), CircuitError> {
        let slot = at.slot;
        let component = self
            .components
            .iter_mut()
            .find(|c| c.id == at.component)
            .ok_or_else(|| CircuitError::UnknownComponent(at.component.clone()))?;
        component.terminal_mut(slot).label =
            label.filter(|l| !l.trim().is_empty());
        self.touch();
        Ok(())
    }

    /// Mark or unmark a terminal as ground. The label is left untouched.
    pub fn set_grounded(&mut self, at: &TerminalRef, grounded: bool) -> Result<(), CircuitError> {
        let slot = at.slot;
        let component = self
            .components
            .iter_mut()
            .find(|c| c.id == at.component)
            .ok_or_else(|| CircuitError::UnknownComponent(at.component.clone()))?;
        component.terminal_mut(slot).grounded = grounded;
        self.touch();
        Ok(())
    }

    /// Register a junction at a grid point. Idempotent per coordinate.
    pub fn add_junction(&mut self, at: GridPoint) {
        if !self.junctions.contains(&at) {
            self.junctions.push(at);
            self.touch();
        }
    }

    /// Connect two endpoints. Terminal endpoints must reference an existing
    /// component; junction endpoints are registered on first use.
    pub fn add_wire(&mut self, a: Endpoint, b: Endpoint) -> Result<WireId, CircuitError> {
        for endpoint in [&a, &b] {
            if let Endpoint::Terminal(t) = endpoint {
                if self.component(&t.component).is_none() {
                    return Err(CircuitError::UnknownComponent(t.component.clone()));
                }
            }
        }
        for endpoint in [&a, &b] {
            if let Endpoint::Junction(p) = endpoint {
                if !self.junctions.contains(p) {
                    self.junctions.push(*p);
                }
            }
        }
        let id = WireId::new();
        self.wires.push(Wire { id, a, b });
        self.touch();
        Ok(id)
    }

    /// Remove a wire. Returns false if the id is unknown.
    pub fn remove_wire(&mut self, id: WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|w| w.id != id);
        let removed = self.wires.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Remove a component together with every wire touching it.
    pub fn remove_component(&mut self, id: &str) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.id != id);
        if self.components.len() == before {
            return false;
        }
        self.wires.retain(|w| !w.touches_component(id));
        self.touch();
        true
    }

    /// Remove a junction together with every wire touching it.
    pub fn remove_junction(&mut self, at: GridPoint) -> bool {
        let before = self.junctions.len();
        self.junctions.retain(|p| *p != at);
        if self.junctions.len() == before {
            return false;
        }
        self.wires.retain(|w| !w.touches_junction(&at));
        self.touch();
        true
    }
}

impl Default for CircuitDocument {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_naming_is_per_kind() {
        let mut doc = CircuitDocument::new("t");
        assert_eq!(doc.add_component(ComponentKind::Resistor, None), "R1");
        assert_eq!(doc.add_component(ComponentKind::VoltageSource, None), "V1");
        assert_eq!(doc.add_component(ComponentKind::Resistor, None), "R2");
    }

    #[test]
    fn naming_never_reuses_a_live_id() {
        let mut doc = CircuitDocument::new("t");
        doc.add_component(ComponentKind::Resistor, None);
        doc.add_component(ComponentKind::Resistor, None);
        let r3 = doc.add_component(ComponentKind::Resistor, None);
        doc.remove_component("R2");
        // R3 still exists, so the next resistor is R4.
        assert_eq!(r3, "R3");
        assert_eq!(doc.add_component(ComponentKind::Resistor, None), "R4");
    }

    #[test]
    fn mutations_bump_revision() {
        let mut doc = CircuitDocument::new("t");
        let r0 = doc.revision();
        let id = doc.add_component(ComponentKind::Resistor, Some(220.0));
        assert!(doc.revision() > r0);

        let r1 = doc.revision();
        doc.set_grounded(&TerminalRef::new(id, Slot::N1), true).unwrap();
        assert!(doc.revision() > r1);
    }

    #[test]
    fn remove_component_drops_its_wires() {
        let mut doc = CircuitDocument::new("t");
        let r1 = doc.add_component(ComponentKind::Resistor, None);
        let r2 = doc.add_component(ComponentKind::Resistor, None);
        doc.add_wire(
            Endpoint::terminal(r1.clone(), Slot::N2),
            Endpoint::terminal(r2, Slot::N1),
        )
        .unwrap();
        assert_eq!(doc.wires().len(), 1);

        assert!(doc.remove_component(&r1));
        assert!(doc.wires().is_empty());
    }

    #[test]
    fn wiring_through_empty_space_registers_a_junction() {
        let mut doc = CircuitDocument::new("t");
        let r1 = doc.add_component(ComponentKind::Resistor, None);
        doc.add_wire(
            Endpoint::terminal(r1, Slot::N1),
            Endpoint::junction(4, 2),
        )
        .unwrap();
        assert_eq!(doc.junctions(), &[GridPoint::new(4, 2)]);
    }

    #[test]
    fn wire_to_unknown_component_is_rejected() {
        let mut doc = CircuitDocument::new("t");
        let err = doc
            .add_wire(
                Endpoint::terminal("R99", Slot::N1),
                Endpoint::junction(0, 0),
            )
            .unwrap_err();
        assert!(matches!(err, CircuitError::UnknownComponent(id) if id == "R99"));
    }

    #[test]
    fn blank_label_clears() {
        let mut doc = CircuitDocument::new("t");
        let id = doc.add_component(ComponentKind::Resistor, None);
        let at = TerminalRef::new(id, Slot::N1);
        doc.set_label(&at, Some("A".to_string())).unwrap();
        assert_eq!(doc.terminal(&at).unwrap().label.as_deref(), Some("A"));
        doc.set_label(&at, Some("   ".to_string())).unwrap();
        assert_eq!(doc.terminal(&at).unwrap().label, None);
    }

    #[test]
    fn document_roundtrips_through_json() {
        let mut doc = CircuitDocument::new("rc");
        let r = doc.add_component(ComponentKind::Resistor, Some(470.0));
        let c = doc.add_component(ComponentKind::Capacitor, None);
        doc.add_wire(
            Endpoint::terminal(r, Slot::N2),
            Endpoint::terminal(c, Slot::N1),
        )
        .unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let back: CircuitDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.components().len(), 2);
        assert_eq!(back.wires().len(), 1);
        assert_eq!(back.revision(), doc.revision());
    }
}
