mod common;

use lensing::{
    ANONYMOUS, ComponentId, ComponentNode, Framework, Rect, Walker,
    memory::{ComponentSpec, MemoryHost},
};

fn node(identity: usize, name: &str, depth: usize, parent: Option<usize>) -> ComponentNode {
    ComponentNode {
        identity: ComponentId::new(identity),
        display_name: name.to_string(),
        depth,
        parent_identity: parent.map(ComponentId::new),
    }
}

#[test]
fn test_walk_assigns_identities_in_pre_order() {
    let page = common::todo_page();
    let nodes = Walker::new(&page.host).walk();

    assert_eq!(
        nodes,
        vec![
            node(0, "App", 0, None),
            node(1, "AppHeader", 1, Some(0)),
            node(2, "TodoList", 1, Some(0)),
            node(3, "TodoItem", 2, Some(2)),
            node(4, "TodoItem", 2, Some(2)),
        ]
    );
}

#[test]
fn test_walk_is_deterministic() {
    let page = common::todo_page();
    let walker = Walker::new(&page.host);
    assert_eq!(walker.walk(), walker.walk());
}

#[test]
fn test_find_by_id_agrees_with_walk() {
    let page = common::todo_page();
    let walker = Walker::new(&page.host);

    for expected in walker.walk() {
        let found = walker.find_by_id(expected.identity).unwrap();
        assert_eq!(found.node, expected);
    }
    assert!(walker.find_by_id(ComponentId::new(5)).is_none());
}

#[test]
fn test_find_by_predicate_returns_live_component() {
    let page = common::todo_page();
    let walker = Walker::new(&page.host);

    let found = walker
        .find_by_predicate(|node, _| node.display_name == "TodoItem")
        .unwrap();
    assert_eq!(found.node.identity, ComponentId::new(3));
    assert_eq!(found.component, page.todo_items[0]);

    let found = walker
        .find_by_predicate(|_, component| *component == page.todo_items[1])
        .unwrap();
    assert_eq!(found.node.identity, ComponentId::new(4));
}

#[test]
fn test_structural_wrapper_consumes_no_identity() {
    let mut host = MemoryHost::new();
    let root_el = host.element("div", Rect::new(0.0, 0.0, 100.0, 100.0), None);

    let a = host.add_component(ComponentSpec::named("A"));
    let a_tree = host.fragment();
    host.render(a, a_tree);

    let wrapper = host.fragment();
    let b = host.add_component(ComponentSpec::named("B"));
    let c = host.add_component(ComponentSpec::named("C"));
    host.append(wrapper, host.link_of(b));
    host.append(a_tree, wrapper);
    host.append(a_tree, host.link_of(c));
    host.mount(root_el, host.link_of(a));

    assert_eq!(
        Walker::new(&host).walk(),
        vec![
            node(0, "A", 0, None),
            node(1, "B", 1, Some(0)),
            node(2, "C", 1, Some(0)),
        ]
    );
}

#[test]
fn test_slot_children_follow_rendered_tree_at_link_depth() {
    let mut host = MemoryHost::new();
    let root_el = host.element("div", Rect::new(0.0, 0.0, 100.0, 100.0), None);

    let layout = host.add_component(ComponentSpec::named("Layout"));
    let layout_tree = host.fragment();
    host.render(layout, layout_tree);
    let sidebar = host.add_component(ComponentSpec::named("Sidebar"));
    host.append(layout_tree, host.link_of(sidebar));

    // Content handed to Layout by its caller hangs off Layout's own link.
    let content = host.add_component(ComponentSpec::named("Content"));
    host.append(host.link_of(layout), host.link_of(content));
    host.mount(root_el, host.link_of(layout));

    assert_eq!(
        Walker::new(&host).walk(),
        vec![
            node(0, "Layout", 0, None),
            node(1, "Sidebar", 1, Some(0)),
            node(2, "Content", 0, None),
        ]
    );
}

#[test]
fn test_display_name_fallbacks() {
    let mut host = MemoryHost::new();
    let root_el = host.element("div", Rect::new(0.0, 0.0, 100.0, 100.0), None);

    let root = host.fragment();
    let specs = [
        ComponentSpec::named("Internal").with_type_name("Declared"),
        ComponentSpec::typed("Declared"),
        ComponentSpec::named("").with_type_name("FromType"),
        ComponentSpec::anonymous(),
    ];
    for spec in specs {
        let component = host.add_component(spec);
        host.append(root, host.link_of(component));
    }
    host.mount(root_el, root);

    let names: Vec<_> = Walker::new(&host)
        .walk()
        .into_iter()
        .map(|n| n.display_name)
        .collect();
    assert_eq!(names, ["Internal", "Declared", "FromType", ANONYMOUS]);
}

#[test]
fn test_empty_page_walks_nothing() {
    let mut host = MemoryHost::new();
    host.element("div", Rect::new(0.0, 0.0, 100.0, 100.0), None);

    let walker = Walker::new(&host);
    assert!(walker.walk().is_empty());
    assert!(walker.find_by_id(ComponentId::new(0)).is_none());
}

#[test]
fn test_identities_shift_after_mutation() {
    let mut page = common::todo_page();
    let before = Walker::new(&page.host).walk();
    assert_eq!(before[1].display_name, "AppHeader");

    let app_tree = page.host.sub_tree(&page.app).unwrap();
    page.host.remove_child(app_tree, page.host.link_of(page.app_header));

    let after = Walker::new(&page.host).walk();
    assert_eq!(after.len(), 4);
    assert_eq!(after[1], node(1, "TodoList", 1, Some(0)));
}

#[test]
fn test_deep_tree_does_not_overflow() {
    let mut host = MemoryHost::new();
    let root_el = host.element("div", Rect::new(0.0, 0.0, 100.0, 100.0), None);

    let root = host.add_component(ComponentSpec::named("Level"));
    let mut parent = root;
    for _ in 0..50_000 {
        let child = host.add_component(ComponentSpec::named("Level"));
        host.render(parent, host.link_of(child));
        parent = child;
    }
    host.mount(root_el, host.link_of(root));

    let nodes = Walker::new(&host).walk();
    assert_eq!(nodes.len(), 50_001);
    assert_eq!(nodes[50_000].depth, 50_000);
}
