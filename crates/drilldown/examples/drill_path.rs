//! Drill-down walkthrough
//!
//! Builds a small mind map, drills into it column by column, backs out and
//! loads a second document, printing the column strip after every step.
//! The deferred scroll is driven by a hand-rolled event loop.
//!
//! Run with: cargo run -p drilldown --example drill_path
//! More detail: RUST_LOG=drilldown=trace cargo run -p drilldown --example drill_path

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use drilldown::prelude::*;
use tracing_subscriber::EnvFilter;

/// A column showing the displayable children of one node.
struct NodeColumn {
    id: ColumnId,
    parent: MindmapNode,
    entries: Vec<String>,
    selected: Option<usize>,
}

impl NodeColumn {
    fn open(map: &Mindmap, key: NodeKey) -> Self {
        let entries = map
            .displayable_children(key)
            .into_iter()
            .filter_map(|child| map.get(child).and_then(|n| n.title()).map(str::to_owned))
            .collect();
        Self {
            id: ColumnId::next(),
            parent: map.get(key).cloned().unwrap_or_else(|| MindmapNode::element("node")),
            entries,
            selected: None,
        }
    }
}

impl Column for NodeColumn {
    type Node = MindmapNode;

    fn id(&self) -> ColumnId {
        self.id
    }

    fn resize(&mut self) {}

    fn deselect_all(&mut self) {
        self.selected = None;
    }

    fn parent_node(&self) -> Option<&MindmapNode> {
        Some(&self.parent)
    }
}

/// Prints attach and detach calls instead of laying anything out.
#[derive(Debug, Default)]
struct ConsoleStrip;

impl ColumnHost<NodeColumn> for ConsoleStrip {
    fn attach(&mut self, column: &NodeColumn) {
        println!("  + {} ({} entries)", column.id, column.entries.len());
    }

    fn detach(&mut self, column: &NodeColumn) {
        println!("  - {}", column.id);
    }

    fn detach_all(&mut self) {
        println!("  - all columns");
    }
}

#[derive(Default)]
struct Viewport {
    scrolls: AtomicUsize,
}

impl ScrollTarget for Viewport {
    fn scroll_to_end(&self) {
        let n = self.scrolls.fetch_add(1, Ordering::SeqCst) + 1;
        println!("  > scrolled to the right edge (#{n})");
    }
}

fn print_strip(stack: &ColumnStack<NodeColumn, ConsoleStrip>) {
    let columns: Vec<String> = stack
        .columns()
        .map(|column| {
            let entries: Vec<String> = column
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    if column.selected == Some(i) {
                        format!("[{entry}]")
                    } else {
                        entry.clone()
                    }
                })
                .collect();
            format!("| {} ", entries.join(" "))
        })
        .collect();
    println!("{}|", columns.concat());
    println!("  title: {:?}  path: {}", stack.title_of_rightmost_parent(), stack.breadcrumb().join(" > "));
}

/// Select entry `index` of column `column` and open it.
fn select(
    stack: &mut ColumnStack<NodeColumn, ConsoleStrip>,
    map: &Mindmap,
    column: ColumnId,
    parent: NodeKey,
    index: usize,
) -> drilldown::Result<()> {
    stack.remove_all_columns_right_of(column)?;
    let Some(child) = map.displayable_children(parent).get(index).copied() else {
        return Ok(());
    };
    if let Some(rightmost) = stack.rightmost_mut() {
        rightmost.selected = Some(index);
    }
    stack.append(NodeColumn::open(map, child));
    stack.request_scroll_to_end();
    Ok(())
}

/// Run the scheduler until nothing is pending, like an event loop would.
fn run_event_loop(scheduler: &SharedTaskScheduler) {
    while let Some(wait) = scheduler.time_until_next() {
        std::thread::sleep(wait);
        scheduler.process_ready_at(Instant::now());
    }
}

fn sample_map() -> Option<(Mindmap, NodeKey, NodeKey, NodeKey)> {
    let mut map = Mindmap::new();
    let root = map.insert_root(MindmapNode::node("Home"));
    let garden = map.insert_child(root, MindmapNode::node("Garden"))?;
    map.insert_child(root, MindmapNode::node("Kitchen"))?;
    map.insert_child(root, MindmapNode::comment("exported from the desktop editor"))?;
    let tomatoes = map.insert_child(garden, MindmapNode::node("Tomatoes"))?;
    map.insert_child(garden, MindmapNode::node("Beans"))?;
    map.insert_child(tomatoes, MindmapNode::node("Sow in March"))?;
    map.insert_child(tomatoes, MindmapNode::element("icon").with_attribute("BUILTIN", "flag"))?;
    Some((map, root, garden, tomatoes))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drilldown=info")),
        )
        .init();

    let config = ColumnStackConfig::from_toml_str("scroll_delay_ms = 100\n")?;
    let scheduler = Arc::new(SharedTaskScheduler::new());
    let viewport = Arc::new(Viewport::default());

    let Some((map, root, garden, _tomatoes)) = sample_map() else {
        return Err("failed to build sample map".into());
    };
    println!("mind map with {} nodes, {} levels deep", map.len(), map.depth());

    let mut stack = ColumnStack::with_host(ConsoleStrip)
        .with_scroller(DeferredScroll::from_config(scheduler.clone(), &viewport, &config));

    println!("\nopen document");
    stack.append(NodeColumn::open(&map, root));
    let root_column = stack.root().map(Column::id).ok_or("no root column")?;
    print_strip(&stack);

    println!("\nselect Garden, then Tomatoes");
    select(&mut stack, &map, root_column, root, 0)?;
    let garden_column = stack.rightmost().map(Column::id).ok_or("no garden column")?;
    select(&mut stack, &map, garden_column, garden, 0)?;
    print_strip(&stack);
    run_event_loop(&scheduler);

    println!("\nback");
    stack.remove_rightmost_column();
    print_strip(&stack);

    println!("\nselect Kitchen in the first column");
    select(&mut stack, &map, root_column, root, 1)?;
    print_strip(&stack);
    run_event_loop(&scheduler);

    println!("\nselect through a column that is gone");
    if let Err(err) = select(&mut stack, &map, garden_column, garden, 1) {
        println!("  error: {err}");
    }

    println!("\nload another document");
    let mut work = Mindmap::new();
    let work_root = work.insert_root(MindmapNode::node("Work"));
    work.insert_child(work_root, MindmapNode::node("Inbox"));
    stack.replace_root(NodeColumn::open(&work, work_root));
    print_strip(&stack);

    println!(
        "\n{} columns, {} scrolls",
        stack.number_of_columns(),
        viewport.scrolls.load(Ordering::SeqCst)
    );
    Ok(())
}
