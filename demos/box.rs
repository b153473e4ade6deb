//! Box Example - a single bordered, titled box
//!
//! Draws one frame into a buffer and prints it, no terminal session needed.
//!
//! Run with: cargo run --example box

use spark_widgets::{Attr, BorderStyle, BoxPrimitive, FrameBuffer, Primitive, Rect, Rgba, TitleAlign};

fn main() {
    let b = BoxPrimitive::new();
    b.set_border(BorderStyle::Rounded);
    b.set_border_attributes(Attr::BOLD);
    b.set_border_color(Rgba::rgb(137, 180, 250));
    b.set_title("Hello, spark-widgets");
    b.set_title_align(TitleAlign::Left);
    b.set_padding(1, 1, 2, 2);
    b.set_rect(Rect::new(0, 0, 32, 6));

    let mut frame = FrameBuffer::new(32, 6);
    b.draw(&mut frame);

    for y in 0..frame.height() {
        println!("{}", frame.row_text(y));
    }
    println!("inner area: {:?}", b.inner_rect());
}
