//! Scripted walkthrough of the product grid.
//!
//! Runs the real grid against the deterministic virtual host: scrolls until
//! the catalog is exhausted, then hovers one card through a full image
//! rotation. Run with `RUST_LOG=debug` to watch the state machines.

use std::time::Duration;

use vitrine_foundation::{PagingConfig, ProductCatalog, ProductId};
use vitrine_testing::GridRobot;
use vitrine_ui::GridConfig;

fn print_visible(robot: &GridRobot) {
    let products = robot.grid().visible_products();
    println!(
        "  visible: {} products (page cursor exhausted: {})",
        products.len(),
        robot.grid().is_exhausted()
    );
    for product in products.iter().take(4) {
        println!(
            "    {} {}: ${:.2} ({} images)",
            product.id,
            product.name,
            product.price,
            product.image_count()
        );
    }
    if products.len() > 4 {
        println!("    … and {} more", products.len() - 4);
    }
}

fn print_layers(robot: &GridRobot, id: ProductId) {
    let layers = robot.grid().image_layers(id);
    let rendered: Vec<String> = layers
        .iter()
        .map(|layer| format!("img{}@{:.2}", layer.index, layer.alpha))
        .collect();
    println!("  {} layers: [{}]", id, rendered.join(", "));
}

fn main() {
    env_logger::init();

    let catalog = ProductCatalog::sample(20, 3);
    log::info!("catalog ready: {} products", catalog.len());
    let config = GridConfig {
        paging: PagingConfig::with_page_size(8),
        ..GridConfig::default()
    };
    let mut robot = GridRobot::launch(catalog, config);

    println!("== scrolling: 20 products, 8 per page ==");
    for event in 1..=4 {
        robot.scroll_to_sentinel();
        println!("sentinel event #{event}");
        print_visible(&robot);
    }

    let hovered = ProductId(3);
    println!("\n== hovering {hovered}: 3 images, one advance every 2000ms ==");
    robot.hover(hovered);
    print_layers(&robot, hovered);

    robot.advance_time(Duration::from_millis(2000));
    robot.advance_time(Duration::from_millis(150));
    println!("150ms into the first fade:");
    print_layers(&robot, hovered);
    robot.advance_time(Duration::from_millis(150));
    println!("after the 300ms fade:");
    print_layers(&robot, hovered);

    for tick in 2..=3 {
        robot.advance_time(Duration::from_millis(1700));
        robot.advance_time(Duration::from_millis(300));
        println!("after rotation tick #{tick}:");
        print_layers(&robot, hovered);
    }

    println!("\n== leaving the card stops the rotation ==");
    robot.unhover(hovered);
    robot.advance_time(Duration::from_millis(6000));
    print_layers(&robot, hovered);
    println!(
        "  running timers: {}, attached observers: {}",
        robot.runtime().active_timer_count(),
        robot.runtime().observer_count()
    );

    robot.unmount();
    println!("\n== after unmount ==");
    println!(
        "  running timers: {}, attached observers: {}",
        robot.runtime().active_timer_count(),
        robot.runtime().observer_count()
    );
}
