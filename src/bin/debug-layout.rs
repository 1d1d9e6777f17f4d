/// Diagnostic tool: generate one layout without any images and print what
/// the populator would be handed.
use collage_rs::layout::Size;
use collage_rs::{generate_layout, GeneratorConfig, ItemTree, NodeId, Resolution};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("collage_rs=debug".parse()?),
        )
        .init();

    // debug-layout [seed] [resolution]
    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 0,
    };
    let resolution: Resolution = match args.next() {
        Some(r) => r.parse()?,
        None => Resolution::default(),
    };

    println!("=== DIAGNOSTIC: Layout Generator ===");
    println!("Seed: {}, canvas: {} ({})", seed, resolution.size(), resolution);

    let config = GeneratorConfig::default().with_resolution(resolution);
    let mut tree = ItemTree::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let layout = generate_layout(&mut tree, &config, &mut rng)?;

    println!("\n[1] Tree ({} nodes, nesting {}):", tree.len(), layout.nesting);
    print_outline(&tree, layout.root, 1);

    println!("\n[2] Bottom-level containers: {}", layout.leaves.len());
    let mut slots = 0;
    for (i, &leaf) in layout.leaves.iter().enumerate() {
        let container = tree.container(leaf)?;
        let free = container.capacity - container.items.len();
        slots += free;
        println!(
            "    [{}] {:?} {} {} - budget {} - {} free of {}",
            i,
            leaf,
            container.layout.name(),
            tree.size(leaf),
            tree.item_budget(leaf),
            free,
            container.capacity
        );
    }
    println!("    Image slots available: {}", slots);

    // Coverage: how much of the canvas the bottom-level containers take up.
    println!("\n[3] Coverage:");
    let canvas = tree.size(layout.root);
    let canvas_area = area(canvas);
    let leaf_area: u64 = layout.leaves.iter().map(|&id| area(tree.size(id))).sum();
    println!("    Leaf area:   {}px²", leaf_area);
    println!("    Canvas area: {}px²", canvas_area);
    println!("    Coverage: {:.1}%", leaf_area as f64 / canvas_area as f64 * 100.0);

    Ok(())
}

fn area(size: Size) -> u64 {
    size.width as u64 * size.height as u64
}

fn print_outline(tree: &ItemTree, id: NodeId, depth: usize) {
    let node = tree.get(id);
    let label = match node.as_container() {
        Some(c) => format!("{} ({}/{})", c.layout.name(), c.items.len(), c.capacity),
        None => "image".to_string(),
    };
    println!("{}{:?} {} {}", "    ".repeat(depth), id, label, node.size);
    for &child in tree.items(id) {
        print_outline(tree, child, depth + 1);
    }
}
