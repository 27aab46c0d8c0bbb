//! Element → component resolution.
//!
//! Picking the *closest* component for an element:
//!
//! 1. Ascend from the element to the first ancestor (itself included) that
//!    carries a tree link. None means the element is outside the application.
//! 2. From that link ascend logical parents to the nearest component
//!    boundary. This is the fallback answer.
//! 3. Walk every component and keep those whose rendered element is the
//!    target or contains it.
//! 4. An exact element match wins. Otherwise the smallest positive rendered
//!    area wins; zero-area candidates are ignored. If no candidate has a
//!    positive area, the first one in walk (identity) order is taken.
//! 5. Re-walk to report the winner's identity in the same numbering as a
//!    fresh component listing.

use crate::{ComponentId, Framework, Point, Visit, Walker};

struct Candidate<C, E> {
    visit: Visit<C>,
    element: E,
}

/// Identity of the closest component rendering (or containing) `target`.
pub fn locate<H: Framework>(host: &H, target: &H::Element) -> Option<ComponentId> {
    let Some(link) = enclosing_link(host, target) else {
        tracing::debug!(element = ?target, "Element is outside any component tree");
        return None;
    };
    let enclosing = nearest_component(host, link);

    let walker = Walker::new(host);
    let candidates: Vec<_> = walker
        .walk_components()
        .into_iter()
        .filter_map(|visit| {
            let element = host.rendered_element(&visit.component)?;
            (element == *target || host.contains(&element, target))
                .then_some(Candidate { visit, element })
        })
        .collect();

    let chosen = match closest(host, target, &candidates) {
        Some(candidate) => candidate.visit.component.clone(),
        None => enclosing?,
    };

    let found = walker
        .find_by_predicate(|_, component| host.same_component(component, &chosen))
        .map(|visit| visit.node.identity);
    tracing::debug!(
        candidates = candidates.len(),
        identity = ?found,
        "Located component for element"
    );
    found
}

/// Identity of the closest component under a viewport point.
pub fn locate_at<H: Framework>(host: &H, point: Point) -> Option<ComponentId> {
    let element = host.element_at(point)?;
    locate(host, &element)
}

fn enclosing_link<H: Framework>(host: &H, element: &H::Element) -> Option<H::Link> {
    let mut current = Some(element.clone());
    while let Some(element) = current {
        if let Some(link) = host.element_link(&element) {
            return Some(link);
        }
        current = host.parent_element(&element);
    }
    None
}

fn nearest_component<H: Framework>(host: &H, link: H::Link) -> Option<H::Component> {
    let mut current = Some(link);
    while let Some(link) = current {
        if let Some(component) = host.component(&link) {
            return Some(component);
        }
        current = host.parent_link(&link);
    }
    None
}

fn closest<'c, H: Framework>(
    host: &H,
    target: &H::Element,
    candidates: &'c [Candidate<H::Component, H::Element>],
) -> Option<&'c Candidate<H::Component, H::Element>> {
    if let Some(exact) = candidates.iter().find(|c| c.element == *target) {
        return Some(exact);
    }

    let mut smallest: Option<(f64, &Candidate<_, _>)> = None;
    for candidate in candidates {
        let area = host.offset_size(&candidate.element).area();
        if area > 0.0 && smallest.is_none_or(|(best, _)| area < best) {
            smallest = Some((area, candidate));
        }
    }

    smallest.map(|(_, c)| c).or_else(|| candidates.first())
}
