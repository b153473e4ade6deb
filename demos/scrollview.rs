//! ScrollView Example - fifteen boxes in a scrolling column
//!
//! A row with a side panel on the left and a scroll view on the right.
//! The scroll view starts five cells down and always shows its scroll bar.
//!
//! - Mouse wheel over the list scrolls it
//! - Click a box to focus it, Tab / Shift+Tab to cycle focus
//! - Arrow keys, PageUp/PageDown, Home/End scroll the list
//! - q, Esc or Ctrl+C quits
//!
//! Logs go to `spark-widgets-demo.log` in the temp directory; set
//! `RUST_LOG=spark_widgets=trace` for per-frame layout output.
//!
//! Run with: cargo run --example scrollview

use std::fs::File;
use std::sync::{Arc, Mutex};

use crossterm::event::{self, Event};
use spark_widgets::{
    BorderStyle, BoxPrimitive, Flex, FlexDirection, FocusManager, KeyCode, KeyEvent,
    MouseDispatcher, MouseTranslator, PrimitiveRef, ScrollBarVisibility, ScrollView,
};
use tracing_subscriber::EnvFilter;

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("spark-widgets-demo.log");
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("spark_widgets=debug".parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn titled_box(title: &str) -> PrimitiveRef {
    let b = BoxPrimitive::new();
    b.set_border(BorderStyle::Single);
    b.set_title(title);
    Arc::new(b)
}

fn build() -> PrimitiveRef {
    let side = Flex::new();
    side.add_item(Some(titled_box("Side")), 0, 1, false);

    let list = Arc::new(ScrollView::new());
    list.base().set_border(BorderStyle::Rounded);
    list.base().set_title("Scroll");
    list.set_scroll_bar_visibility(ScrollBarVisibility::Always);
    for i in 0..15 {
        list.add_item(Some(titled_box(&format!("Box {i}"))), 3, i == 0);
    }
    list.scroll_to(5);

    let root = Flex::new();
    root.set_direction(FlexDirection::Row);
    root.set_full_screen(true);
    let side: PrimitiveRef = Arc::new(side);
    let list: PrimitiveRef = list;
    root.add_item(Some(side), 0, 1, false);
    root.add_item(Some(list), 0, 3, true);
    Arc::new(root)
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.ctrl,
        _ => false,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let root = build();
    let mut focus = FocusManager::new();
    let mut translator = MouseTranslator::new();
    let mut dispatcher = MouseDispatcher::new();
    focus.set_focus(root.clone());

    let mut terminal = spark_widgets::Terminal::enter()?;
    loop {
        terminal.draw(root.as_ref())?;

        match event::read()? {
            Event::Key(raw) => {
                let key = KeyEvent::from(raw);
                if !key.is_press() {
                    continue;
                }
                if is_quit(&key) {
                    break;
                }
                focus.handle_key(&root, &key);
            }
            Event::Mouse(raw) => {
                for (action, event) in translator.translate(raw) {
                    dispatcher.dispatch_with_focus(&root, action, event, &mut focus);
                }
            }
            Event::Resize(width, height) => terminal.resize(width, height),
            _ => {}
        }
    }

    Ok(())
}
