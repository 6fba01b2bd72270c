//! Call-tree aggregation for d3-flame-graph.
//!
//! Stacks are merged into a tree of [`StackFrame`] nodes. Each distinct
//! child label appears exactly once under its parent; re-encountering a
//! label reuses the existing node. Node counts increment by 1 per visiting
//! event, not by the event's classified weight - the folded and tree
//! outputs intentionally disagree in magnitude for weighted event kinds.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// The bottom of every stack must be "root"
const ROOT: &str = "root";

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// One node of the call tree
///
/// Children are kept in first-seen order in `children`; `child_index` is a
/// label-to-position side table for O(1) merge lookup and never serialized.
/// Leaves serialize without a `children` field at all, which downstream
/// renderers rely on.
#[derive(Debug, Serialize)]
pub struct StackFrame {
    name: String,
    value: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<StackFrame>,
    #[serde(skip)]
    child_index: HashMap<String, usize>,
}

impl StackFrame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Locate or create the child with the given label and count the visit
    ///
    /// **Public** - the single mutation point of the tree
    pub fn add_frame(&mut self, name: &str) -> &mut StackFrame {
        let index = match self.child_index.get(name) {
            Some(&index) => index,
            None => {
                self.children.push(StackFrame::new(name));
                let index = self.children.len() - 1;
                self.child_index.insert(name.to_string(), index);
                index
            }
        };

        let child = &mut self.children[index];
        child.value += 1;
        child
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn children(&self) -> &[StackFrame] {
        &self.children
    }

    /// Find a direct child by label
    pub fn child(&self, name: &str) -> Option<&StackFrame> {
        self.child_index.get(name).map(|&index| &self.children[index])
    }

    fn count_visit(&mut self) {
        self.value += 1;
    }
}

/// Tree aggregation over a whole conversion pass
///
/// In live mode each epoch second of event start time gets its own
/// independent root, created lazily on first use.
#[derive(Debug)]
pub struct CallTreeBuilder {
    live: bool,
    root: StackFrame,
    buckets: BTreeMap<i64, StackFrame>,
}

impl CallTreeBuilder {
    pub fn new(live: bool) -> Self {
        Self {
            live,
            root: StackFrame::new(ROOT),
            buckets: BTreeMap::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Merge one normalized stack into the tree
    ///
    /// `frames` is consumed from the leaf end toward the root end. The
    /// selected root and every node along the path gain exactly one count.
    /// Empty sequences leave the tree untouched.
    pub fn fold(&mut self, frames: &[String], start_nanos: i64) {
        if frames.is_empty() {
            return;
        }

        let root = if self.live {
            let bucket = start_nanos / NANOS_PER_SEC;
            self.buckets
                .entry(bucket)
                .or_insert_with(|| StackFrame::new(ROOT))
        } else {
            &mut self.root
        };
        root.count_visit();

        let mut node = root;
        for label in frames.iter().rev() {
            node = node.add_frame(label);
        }
    }

    /// The single global root (non-live mode)
    pub fn root(&self) -> &StackFrame {
        &self.root
    }

    /// Per-second roots (live mode), keyed by epoch second
    pub fn buckets(&self) -> &BTreeMap<i64, StackFrame> {
        &self.buckets
    }
}
