#![allow(dead_code)]

use lensing::{
    DependencyRecord, Live, Rect,
    memory::{ComponentSpec, ElementId, InstanceId, MemoryHost},
};

/// A small todo application:
///
/// ```text
/// App                 <main>   800x600
/// ├─ AppHeader        <header> 800x60
/// └─ TodoList         <ul>     800x400
///    ├─ TodoItem      <li>     800x40  > <span>
///    └─ TodoItem      <li>     800x40  > <span>
/// ```
pub struct TodoPage {
    pub host: MemoryHost,
    pub container: ElementId,
    pub main: ElementId,
    pub header: ElementId,
    pub list: ElementId,
    pub items: [ElementId; 2],
    pub labels: [ElementId; 2],
    pub outside: ElementId,
    pub app: InstanceId,
    pub app_header: InstanceId,
    pub todo_list: InstanceId,
    pub todo_items: [InstanceId; 2],
}

pub fn todo_page() -> TodoPage {
    let mut host = MemoryHost::new();

    let body = host.element("body", Rect::new(0.0, 0.0, 1024.0, 2000.0), None);
    let container = host.element("div", Rect::new(0.0, 0.0, 800.0, 600.0), Some(body));
    let main = host.element("main", Rect::new(0.0, 0.0, 800.0, 600.0), Some(container));
    let header = host.element("header", Rect::new(0.0, 0.0, 800.0, 60.0), Some(main));
    let list = host.element("ul", Rect::new(0.0, 60.0, 800.0, 400.0), Some(main));
    let items = [
        host.element("li", Rect::new(0.0, 60.0, 800.0, 40.0), Some(list)),
        host.element("li", Rect::new(0.0, 100.0, 800.0, 40.0), Some(list)),
    ];
    let labels = [
        host.element("span", Rect::new(10.0, 70.0, 100.0, 20.0), Some(items[0])),
        host.element("span", Rect::new(10.0, 110.0, 100.0, 20.0), Some(items[1])),
    ];
    let outside = host.element("aside", Rect::new(850.0, 0.0, 100.0, 100.0), Some(body));

    let app = host.add_component(ComponentSpec::named("App"));
    let app_tree = host.fragment();
    host.bind(app_tree, main);
    host.render(app, app_tree);

    let app_header = host.add_component(ComponentSpec::typed("AppHeader"));
    let header_tree = host.leaf();
    host.bind(header_tree, header);
    host.render(app_header, header_tree);

    let todo_list = host.add_component(
        ComponentSpec::named("TodoList")
            .with_props(Live::object([("title", Live::from("Groceries"))]))
            .with_emitter(),
    );
    let list_tree = host.fragment();
    host.bind(list_tree, list);
    host.render(todo_list, list_tree);
    host.add_record(todo_list, DependencyRecord::flat("count", Live::from(2)));

    let todo_items = [0, 1].map(|i| {
        let item = host.add_component(
            ComponentSpec::named("TodoItem")
                .with_props(Live::object([("done", Live::from(i == 0))])),
        );
        let tree = host.leaf();
        host.bind(tree, items[i]);
        host.render(item, tree);
        item
    });

    host.append(app_tree, host.link_of(app_header));
    host.append(app_tree, host.link_of(todo_list));
    for item in todo_items {
        host.append(list_tree, host.link_of(item));
    }
    host.mount(container, host.link_of(app));

    TodoPage {
        host,
        container,
        main,
        header,
        list,
        items,
        labels,
        outside,
        app,
        app_header,
        todo_list,
        todo_items,
    }
}
