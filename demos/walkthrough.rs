use chrono::Utc;
use lensing::{
    ComponentId, Config, DependencyRecord, Live, LiveObject, Rect, Result,
    agent::connect,
    assets::AssetFeed,
    memory::{ComponentSpec, MemoryHost},
    picker::PageEvent,
};
use serde_json::json;

// A counter app with a shared store and a self-referencing state object
fn build_page() -> (MemoryHost, lensing::memory::ElementId) {
    let mut host = MemoryHost::new();
    let container = host.element("div", Rect::new(0.0, 0.0, 640.0, 480.0), None);
    let main = host.element("main", Rect::new(0.0, 0.0, 640.0, 480.0), Some(container));
    let button = host.element("button", Rect::new(20.0, 20.0, 120.0, 32.0), Some(main));

    let app = host.add_component(ComponentSpec::named("App"));
    let app_tree = host.fragment();
    host.bind(app_tree, main);
    host.render(app, app_tree);

    let settings = LiveObject::new();
    settings.set("theme", Live::from("dark"));
    settings.set("self", Live::Object(settings.clone()));
    host.add_record(app, DependencyRecord::nested("settings", "theme", Live::Object(settings)));

    let counter = host.add_component(
        ComponentSpec::named("Counter")
            .with_props(Live::object([("step", Live::from(1))]))
            .with_emitter(),
    );
    let counter_tree = host.leaf();
    host.bind(counter_tree, button);
    host.render(counter, counter_tree);
    host.add_record(counter, DependencyRecord::flat("count", Live::from(3)));

    host.append(app_tree, host.link_of(counter));
    host.mount(container, host.link_of(app));
    host.add_store("session", Live::object([("user", Live::from("ada"))]));

    (host, button)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = Config::default();
    let mut feed = AssetFeed::from(&config);
    let host_url = format!("https://{}", config.asset_host);
    feed.observe_request(&format!("{host_url}/acme/shop/latest/assets/cart.js?v=3"), Utc::now());
    feed.observe_request(&format!("{host_url}/acme/shop/latest/assets/index.js"), Utc::now());
    println!("assets: {}", json!(feed.grouped()));

    let (host, button) = build_page();
    let (mut agent, client, events) = connect(host, config);

    let (_, result) = tokio::join!(agent.run(), async {
        for node in client.list_components().await? {
            println!(
                "{}{} {}",
                "  ".repeat(node.depth),
                node.identity,
                node.display_name
            );
        }

        let state = client.get_component_state(ComponentId::new(0)).await?;
        println!("App state: {}", json!(state));

        let picking = client.pick();
        let operator = async {
            loop {
                let disposition = events.dispatch(PageEvent::Click { target: button }).await?;
                if disposition.is_swallowed() {
                    break;
                }
                tokio::task::yield_now().await;
            }
            Ok::<_, lensing::Error>(())
        };
        let (picked, operated) = tokio::join!(picking, operator);
        operated?;
        if let Some(id) = picked? {
            println!("picked {id}");
            client.reveal(id).await?;
            client.emit_event(id, "increment", Some(json!({"by": 1}))).await?;
        }

        for key in client.list_stores().await? {
            println!("store {key}: {:?}", client.get_store_state(key.clone()).await?);
        }

        client.shutdown();
        Ok::<_, lensing::Error>(())
    });
    result
}
