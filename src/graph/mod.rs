//! Decoded object graph.
//!
//! All objects produced by a decode session live in one arena, indexed by
//! [`NodeId`]. Parent/child and shared-reference relationships are stored
//! as indices, which keeps the graph trivially inspectable: an object that
//! is referenced twice holds the same `NodeId` at both sites. Nodes are
//! never mutated after the decode pass that produced them.

use smallvec::SmallVec;

use crate::util::ClassId;

/// Index of a decoded object within its session's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub u32);

/// A single decoded attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    ClassId(ClassId),
    /// A nested or shared object; shared entries point at the same node.
    Object(NodeId),
    List(Vec<AttrValue>),
}

impl AttrValue {
    pub fn as_object(&self) -> Option<NodeId> {
        match self {
            AttrValue::Object(id) => Some(*id),
            _ => None,
        }
    }
}

/// One decoded object: a typed attribute bag plus owned children and
/// trailing extension records.
#[derive(Clone, Debug)]
pub struct ObjectNode {
    pub class_name: &'static str,
    pub class_id: ClassId,
    pub version: u16,
    attrs: SmallVec<[(&'static str, AttrValue); 8]>,
    /// Exclusively-owned nested objects (e.g. a group layer's layers).
    pub children: Vec<NodeId>,
    /// Successfully decoded trailing extension records.
    pub extensions: Vec<NodeId>,
}

impl ObjectNode {
    pub fn new(class_name: &'static str, class_id: ClassId, version: u16) -> Self {
        Self {
            class_name,
            class_id,
            version,
            attrs: SmallVec::new(),
            children: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Set an attribute, replacing any earlier value under the same name.
    pub fn set(&mut self, name: &'static str, value: AttrValue) {
        for (k, v) in &mut self.attrs {
            if *k == name {
                *v = value;
                return;
            }
        }
        self.attrs.push((name, value));
    }

    /// Get an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Iterate attributes in decode order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (*k, v))
    }
}

/// Arena of decoded objects for one session.
#[derive(Default, Debug)]
pub struct ObjectArena {
    nodes: Vec<ObjectNode>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its id.
    pub fn alloc(&mut self, node: ObjectNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &ObjectNode {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut ObjectNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Project a node to a plain nested mapping for introspection and
    /// tests. Shared nodes are re-projected at every site, so the result
    /// is a tree view of the underlying graph.
    pub fn project(&self, id: NodeId) -> serde_json::Value {
        let node = self.get(id);
        let mut map = serde_json::Map::new();
        map.insert("type".into(), node.class_name.into());
        map.insert("version".into(), node.version.into());
        for (name, value) in node.attrs() {
            map.insert(name.to_string(), self.project_value(value));
        }
        if !node.children.is_empty() {
            let children: Vec<_> = node.children.iter().map(|&c| self.project(c)).collect();
            map.insert("children".into(), children.into());
        }
        if !node.extensions.is_empty() {
            let exts: Vec<_> = node.extensions.iter().map(|&c| self.project(c)).collect();
            map.insert("extensions".into(), exts.into());
        }
        serde_json::Value::Object(map)
    }

    fn project_value(&self, value: &AttrValue) -> serde_json::Value {
        match value {
            AttrValue::Null => serde_json::Value::Null,
            AttrValue::Bool(b) => (*b).into(),
            AttrValue::Int(i) => (*i).into(),
            AttrValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            AttrValue::Str(s) => s.clone().into(),
            AttrValue::ClassId(id) => id.to_string().into(),
            AttrValue::Object(id) => self.project(*id),
            AttrValue::List(items) => {
                items.iter().map(|v| self.project_value(v)).collect::<Vec<_>>().into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_set_get() {
        let mut node = ObjectNode::new("RgbColor", ClassId::NIL, 1);
        node.set("R", AttrValue::Int(255));
        node.set("R", AttrValue::Int(128));
        assert_eq!(node.get("R"), Some(&AttrValue::Int(128)));
        assert_eq!(node.get("G"), None);
    }

    #[test]
    fn test_projection_shared_node() {
        let mut arena = ObjectArena::new();
        let color = arena.alloc(ObjectNode::new("RgbColor", ClassId::NIL, 1));
        arena.get_mut(color).set("R", AttrValue::Int(255));

        let mut sym = ObjectNode::new("SimpleLineSymbol", ClassId::NIL, 1);
        sym.set("color", AttrValue::Object(color));
        sym.set("outline_color", AttrValue::Object(color));
        let sym = arena.alloc(sym);

        let json = arena.project(sym);
        assert_eq!(json["color"]["R"], 255);
        assert_eq!(json["outline_color"]["R"], 255);
    }

    #[test]
    fn test_projection_children() {
        let mut arena = ObjectArena::new();
        let child = arena.alloc(ObjectNode::new("FeatureLayer", ClassId::NIL, 3));
        let mut group = ObjectNode::new("GroupLayer", ClassId::NIL, 2);
        group.children.push(child);
        let group = arena.alloc(group);

        let json = arena.project(group);
        assert_eq!(json["children"].as_array().unwrap().len(), 1);
        assert_eq!(json["children"][0]["type"], "FeatureLayer");
    }
}
