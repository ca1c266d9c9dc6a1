use std::rc::Rc;

use banner::{BannerOptions, BannerView, ItemView, LayoutParams, PageEvent, Size};
use banner_adapter::{ListAdapter, PagedTrack};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Debug)]
struct Label {
    text: String,
}

impl ItemView for Label {
    fn layout_params(&self) -> LayoutParams {
        LayoutParams::MATCH_PARENT
    }
}

fn main() {
    // Example: a single-item banner that grows on every click and starts rotating once it has
    // more than one item. Run with RUST_LOG=banner=trace to see the carousel's own events.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,banner=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let adapter = Rc::new(ListAdapter::new(
        |_view_type| Label {
            text: String::new(),
        },
        |label: &mut Label, item: &String, _index: usize| label.text.clone_from(item),
    ));
    adapter.set_items(vec!["test  0".to_string()]);
    adapter.add_click_callback({
        let adapter = Rc::downgrade(&adapter);
        move |view: &Label, _item: &String, index: usize| {
            info!(text = %view.text, index, "toast");
            if let Some(adapter) = adapter.upgrade() {
                let next = adapter.len();
                adapter.push(format!("test  {next}"));
            }
        }
    });

    let options = BannerOptions::stepped()
        .with_gap_interval_ms(1000)
        .with_scroll_duration_ms(300);
    let mut view = BannerView::new(options, PagedTrack::new(Size::new(360, 160)), 0);
    view.set_adapter(Some(adapter.clone()));
    view.register_page_change_callback(|event| {
        if let PageEvent::Selected { position, item } = event {
            info!(position, item, "page selected");
        }
    });

    let mut now_ms = 0u64;
    let mut next_tap_ms = 1_500u64;
    while now_ms <= 6_000 {
        view.tick(now_ms);
        if let Err(err) = view.layout() {
            info!(%err, "layout failed");
            break;
        }

        // Tap the visible page every 1.5 s.
        if now_ms >= next_tap_ms {
            next_tap_ms += 1_500;
            let page = view.current_position();
            if let Some(holder) = view.holder_at(page) {
                adapter.perform_click(holder);
            }
        }
        now_ms += 16;
    }

    info!(
        items = adapter.len(),
        position = view.current_position(),
        offset = view.surface().offset(),
        "done"
    );
    view.destroy();
}
