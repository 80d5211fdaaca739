// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of a scene subtree.
//!
//! Each node becomes an object:
//!
//! ```json
//! {
//!   "index": 0, "generation": 0, "kind": "movie",
//!   "x": 0.0, "y": 0.0, "active": true, "stage": 0,
//!   "bounds": { "top": 0.0, "right": 25.0, "bottom": 10.0, "left": 0.0 },
//!   "children": [ ... ]
//! }
//! ```
//!
//! `stage` is `null` for inactive nodes. `children` is omitted for leaves.

use std::io::Write;

use serde_json::{Map, Value, json};
use tableau_core::scene::{NodeId, Scene};
use tableau_core::stage::StageId;

/// Exports the subtree rooted at `root`.
///
/// # Panics
///
/// Panics if `root` is stale.
#[must_use]
pub fn to_json(scene: &Scene, root: NodeId) -> Value {
    let position = scene.position(root);
    let bounds = scene.computed_size(root);

    let mut obj = Map::new();
    obj.insert("index".into(), json!(root.index()));
    obj.insert("generation".into(), json!(root.generation()));
    obj.insert("kind".into(), json!(scene.kind(root).as_str()));
    obj.insert("x".into(), json!(position.x));
    obj.insert("y".into(), json!(position.y));
    obj.insert("active".into(), json!(scene.is_active(root)));
    obj.insert("stage".into(), json!(scene.stage(root).map(StageId::index)));
    obj.insert(
        "bounds".into(),
        json!({
            "top": bounds.top,
            "right": bounds.right,
            "bottom": bounds.bottom,
            "left": bounds.left,
        }),
    );
    if scene.has_display_list(root) {
        let children = scene
            .children(root)
            .into_iter()
            .map(|child| to_json(scene, child))
            .collect();
        obj.insert("children".into(), Value::Array(children));
    }
    Value::Object(obj)
}

/// Writes the subtree rooted at `root` as indented JSON.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_pretty<W: Write>(scene: &Scene, root: NodeId, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &to_json(scene, root))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};
    use tableau_core::scene::NodeKind;

    use super::*;

    #[test]
    fn nested_subtree() {
        let mut scene = Scene::new();
        let stage = scene.create_stage();
        let movie = scene.create_node(NodeKind::Movie);
        let group = scene.create_node(NodeKind::Container);
        let leaf = scene.create_node(NodeKind::Leaf);
        scene.set_position(group, Point::new(5.0, 0.0));
        scene.set_content_bounds(leaf, Rect::new(0.0, 0.0, 20.0, 10.0));
        scene.add_child(group, leaf).add_child(movie, group);
        scene.activate(movie, Some(stage));

        let v = to_json(&scene, movie);
        assert_eq!(v["kind"], "movie");
        assert_eq!(v["active"], true);
        assert_eq!(v["stage"], 0);
        assert_eq!(v["bounds"]["right"], 25.0);

        let group_json = &v["children"][0];
        assert_eq!(group_json["index"], group.index());
        assert_eq!(group_json["x"], 5.0);

        let leaf_json = &group_json["children"][0];
        assert_eq!(leaf_json["kind"], "leaf");
        assert!(leaf_json.get("children").is_none());
        assert_eq!(leaf_json["bounds"]["bottom"], 10.0);
    }

    #[test]
    fn inactive_node_has_null_stage() {
        let mut scene = Scene::new();
        let node = scene.create_node(NodeKind::Container);
        let v = to_json(&scene, node);
        assert_eq!(v["active"], false);
        assert!(v["stage"].is_null());
        assert_eq!(v["children"], json!([]));
    }

    #[test]
    fn pretty_output_parses_back() {
        let mut scene = Scene::new();
        let root = scene.create_node(NodeKind::Container);
        let a = scene.create_node(NodeKind::Leaf);
        let b = scene.create_node(NodeKind::Leaf);
        scene.add_children(root, &[a, b]);

        let mut out = Vec::new();
        write_pretty(&scene, root, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\n'), "expected indented output");

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, to_json(&scene, root));
        let indices: Vec<_> = parsed["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["index"].as_u64().unwrap())
            .collect();
        assert_eq!(indices, vec![u64::from(a.index()), u64::from(b.index())]);
    }
}
