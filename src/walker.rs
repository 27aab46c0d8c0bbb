use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::{ComponentId, Framework};

pub const ANONYMOUS: &str = "Anonymous";

/// One component boundary met during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub identity: ComponentId,
    pub display_name: String,
    pub depth: usize,
    pub parent_identity: Option<ComponentId>,
}

/// A node together with the live component it was read from.
#[derive(Debug, Clone)]
pub struct Visit<C> {
    pub node: ComponentNode,
    pub component: C,
}

struct Frame<L> {
    link: L,
    depth: usize,
    parent: Option<ComponentId>,
}

/// Pre-order traversal of the framework's live tree.
///
/// Identities are handed out in visiting order starting at 0, so they are
/// only meaningful for the tree as it was during the walk. Every search
/// re-walks from the root with the same numbering as [`Walker::walk`];
/// nothing is cached between calls.
///
/// At each link:
/// - a component boundary gets the next identity, then its rendered sub tree
///   is walked one level deeper with the component as parent, then the
///   link's own children (slot content) at the link's level,
/// - any other link is transparent: its children are walked at the same
///   depth and parent, without consuming an identity.
pub struct Walker<'h, H: Framework> {
    host: &'h H,
}

impl<'h, H: Framework> Walker<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    pub fn walk(&self) -> Vec<ComponentNode> {
        let mut nodes = Vec::new();
        self.traverse(|node, _| {
            nodes.push(node.clone());
            ControlFlow::<()>::Continue(())
        });
        tracing::debug!(components = nodes.len(), "Walked component tree");
        nodes
    }

    /// Full walk that also keeps the live component of every node.
    pub fn walk_components(&self) -> Vec<Visit<H::Component>> {
        let mut visits = Vec::new();
        self.traverse(|node, component| {
            visits.push(Visit {
                node: node.clone(),
                component: component.clone(),
            });
            ControlFlow::<()>::Continue(())
        });
        visits
    }

    pub fn find_by_id(&self, id: ComponentId) -> Option<Visit<H::Component>> {
        self.find_by_predicate(|node, _| node.identity == id)
    }

    /// First component, in walk order, accepted by `predicate`. Stops walking
    /// as soon as it is found.
    pub fn find_by_predicate<P>(&self, mut predicate: P) -> Option<Visit<H::Component>>
    where
        P: FnMut(&ComponentNode, &H::Component) -> bool,
    {
        self.traverse(|node, component| {
            if predicate(node, component) {
                ControlFlow::Break(Visit {
                    node: node.clone(),
                    component: component.clone(),
                })
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Walks with an explicit stack; the tree may be arbitrarily deep.
    fn traverse<B, F>(&self, mut visit: F) -> Option<B>
    where
        F: FnMut(&ComponentNode, &H::Component) -> ControlFlow<B>,
    {
        let Some(root) = self.host.root_link() else {
            tracing::debug!("No element carries a tree link, nothing to walk");
            return None;
        };

        let mut next_id = 0;
        let mut stack = vec![Frame {
            link: root,
            depth: 0,
            parent: None,
        }];

        while let Some(Frame {
            link,
            depth,
            parent,
        }) = stack.pop()
        {
            // Children go on the stack first so a component's sub tree, pushed
            // after them, is fully walked before them.
            if let Some(children) = self.host.children(&link) {
                stack.extend(children.into_iter().rev().map(|child| Frame {
                    link: child,
                    depth,
                    parent,
                }));
            }

            let Some(component) = self.host.component(&link) else {
                continue;
            };

            let node = ComponentNode {
                identity: ComponentId::new(next_id),
                display_name: self.display_name(&component),
                depth,
                parent_identity: parent,
            };
            next_id += 1;

            if let ControlFlow::Break(found) = visit(&node, &component) {
                return Some(found);
            }

            if let Some(sub_tree) = self.host.sub_tree(&component) {
                stack.push(Frame {
                    link: sub_tree,
                    depth: depth + 1,
                    parent: Some(node.identity),
                });
            }
        }
        None
    }

    fn display_name(&self, component: &H::Component) -> String {
        self.host
            .internal_name(component)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.host
                    .type_name(component)
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}
