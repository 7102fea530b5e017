//! Example: a todo list driven by delegated clicks

use nwd::{Dom, Handler};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Todos</title></head>
<body>
  <ul id="todos">
    <li class="item">milk</li>
    <li class="item">eggs</li>
  </ul>
</body>
</html>"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dom = Dom::from_html(PAGE)?;
    tracing::info!("nwd v{} loaded {:?}", nwd::VERSION, dom.document().title());

    let greet = Handler::new(|dom, _, _| {
        let count = dom.select(".item").map(|items| items.len()).unwrap_or(0);
        tracing::info!("Ready with {} todo(s)", count);
    });
    dom.ready(&greet);

    let toggle = Handler::new(|dom, item, _| {
        dom.wrap(item).toggle_class("done");
    });
    let list = dom.select("#todos")?;
    list.on_delegated("click", ".item", &toggle)?;

    // Items added later are still handled by the list's listener
    list.append(&dom.fragment(r#"<li class="item">bread</li>"#)?)?;
    dom.mark_loaded();

    for item in &dom.select(".item")? {
        dom.click(item);
    }
    dom.click(dom.select(".item")?.get(1).unwrap_or(dom.root()));

    let done = dom.select(".done")?;
    for item in &done {
        println!("done: {}", dom.document().tree.text_content(item));
    }
    println!("{} of {} done", done.len(), dom.select(".item")?.len());

    list.off_delegated("click", ".item", &toggle);
    println!("listeners left: {}", dom.registration_count());
    Ok(())
}
