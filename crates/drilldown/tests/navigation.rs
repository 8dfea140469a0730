//! Integration tests driving a column stack over a mind-map document.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use drilldown::prelude::*;
use tracing_subscriber::EnvFilter;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A column listing the displayable children of one mind-map node.
struct NodeColumn {
    id: ColumnId,
    parent: MindmapNode,
    entries: Vec<NodeKey>,
    selected: Option<usize>,
    resizes: usize,
}

impl NodeColumn {
    fn for_node(map: &Mindmap, key: NodeKey) -> Self {
        Self {
            id: ColumnId::next(),
            parent: map.get(key).cloned().unwrap_or_else(|| MindmapNode::text("")),
            entries: map.displayable_children(key),
            selected: None,
            resizes: 0,
        }
    }
}

impl Column for NodeColumn {
    type Node = MindmapNode;

    fn id(&self) -> ColumnId {
        self.id
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }

    fn deselect_all(&mut self) {
        self.selected = None;
    }

    fn parent_node(&self) -> Option<&MindmapNode> {
        Some(&self.parent)
    }
}

/// The on-screen strip, tracking which columns are attached.
#[derive(Debug, Default)]
struct Strip {
    attached: Vec<ColumnId>,
    detach_all_calls: usize,
}

impl ColumnHost<NodeColumn> for Strip {
    fn attach(&mut self, column: &NodeColumn) {
        self.attached.push(column.id());
    }

    fn detach(&mut self, column: &NodeColumn) {
        self.attached.retain(|&id| id != column.id());
    }

    fn detach_all(&mut self) {
        self.attached.clear();
        self.detach_all_calls += 1;
    }
}

#[derive(Default)]
struct Viewport {
    scrolls: AtomicUsize,
}

impl ScrollTarget for Viewport {
    fn scroll_to_end(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}

struct Garden {
    map: Mindmap,
    root: NodeKey,
    garden: NodeKey,
    tomatoes: NodeKey,
    kitchen: NodeKey,
}

fn garden_map() -> Garden {
    let mut map = Mindmap::new();
    let root = map.insert_root(MindmapNode::node("Home"));
    let garden = map.insert_child(root, MindmapNode::node("Garden")).unwrap();
    map.insert_child(root, MindmapNode::comment("rooms below")).unwrap();
    let kitchen = map.insert_child(root, MindmapNode::node("Kitchen")).unwrap();
    let tomatoes = map.insert_child(garden, MindmapNode::node("Tomatoes")).unwrap();
    map.insert_child(garden, MindmapNode::node("Beans")).unwrap();
    map.insert_child(tomatoes, MindmapNode::element("icon").with_attribute("BUILTIN", "flag"))
        .unwrap();
    map.insert_child(tomatoes, MindmapNode::node("Seeds")).unwrap();
    map.insert_child(kitchen, MindmapNode::node("Spices")).unwrap();

    Garden {
        map,
        root,
        garden,
        tomatoes,
        kitchen,
    }
}

/// Select `child` in the column `column`, dropping everything to its right
/// and opening the child's children as the new rightmost column.
fn select(
    stack: &mut ColumnStack<NodeColumn, Strip>,
    map: &Mindmap,
    column: ColumnId,
    child: NodeKey,
) -> drilldown::Result<usize> {
    let removed = stack.truncate_right_of(column)?;
    if let Some(rightmost) = stack.rightmost_mut() {
        rightmost.selected = rightmost.entries.iter().position(|&key| key == child);
    }
    stack.append(NodeColumn::for_node(map, child));
    stack.request_scroll_to_end();
    Ok(removed)
}

fn ids(stack: &ColumnStack<NodeColumn, Strip>) -> Vec<ColumnId> {
    stack.columns().map(Column::id).collect()
}

#[test]
fn test_drill_in_and_back_out() {
    setup();
    let doc = garden_map();
    let mut stack = ColumnStack::with_host(Strip::default());
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];

    assert_eq!(stack.rightmost().map(|c| c.entries.clone()), Some(vec![doc.garden, doc.kitchen]));

    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();
    let garden_column = ids(&stack)[1];
    select(&mut stack, &doc.map, garden_column, doc.tomatoes).unwrap();

    assert_eq!(stack.number_of_columns(), 3);
    assert_eq!(stack.title_of_rightmost_parent(), "Tomatoes");
    assert_eq!(stack.breadcrumb(), ["Home", "Garden", "Tomatoes"]);
    assert_eq!(stack.host().attached, ids(&stack));
    assert_eq!(stack.column(garden_column).and_then(|c| c.selected), Some(0));

    // Back button: the garden column loses its selection when it becomes rightmost.
    assert!(stack.remove_rightmost_column());
    assert_eq!(stack.title_of_rightmost_parent(), "Garden");
    assert_eq!(stack.rightmost().and_then(|c| c.selected), None);
    assert_eq!(stack.host().attached, ids(&stack));

    assert!(stack.remove_rightmost_column());
    assert!(!stack.remove_rightmost_column());
    assert_eq!(ids(&stack), [root_column]);
    assert_eq!(stack.title_of_rightmost_parent(), "Home");
}

#[test]
fn test_selecting_in_earlier_column_replaces_path() {
    setup();
    let doc = garden_map();
    let mut stack = ColumnStack::with_host(Strip::default());
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];

    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();
    let garden_column = ids(&stack)[1];
    select(&mut stack, &doc.map, garden_column, doc.tomatoes).unwrap();

    let removed = select(&mut stack, &doc.map, root_column, doc.kitchen).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(stack.breadcrumb(), ["Home", "Kitchen"]);
    assert_eq!(stack.root().and_then(|c| c.selected), Some(1));
    assert_eq!(stack.host().attached, ids(&stack));

    // The garden column is gone; selecting through it fails cleanly.
    let err = select(&mut stack, &doc.map, garden_column, doc.tomatoes).unwrap_err();
    assert!(err.is_column_not_found());
    assert_eq!(err.to_string(), format!("{garden_column} is not part of the column stack"));
    assert_eq!(stack.breadcrumb(), ["Home", "Kitchen"]);
}

#[test]
fn test_loading_new_document() {
    setup();
    let doc = garden_map();
    let mut stack = ColumnStack::with_host(Strip::default());
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];
    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();

    let mut other = Mindmap::new();
    let other_root = other.insert_root(MindmapNode::node("Work"));
    other.insert_child(other_root, MindmapNode::node("Inbox")).unwrap();

    stack.replace_root(NodeColumn::for_node(&other, other_root));
    assert_eq!(stack.number_of_columns(), 1);
    assert_eq!(stack.host().detach_all_calls, 1);
    assert_eq!(stack.host().attached, ids(&stack));
    assert_eq!(stack.title_of_rightmost_parent(), "Work");
    assert!(!stack.contains(root_column));
}

#[test]
fn test_resize_reaches_every_column() {
    setup();
    let doc = garden_map();
    let mut stack = ColumnStack::with_host(Strip::default());
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];
    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();

    stack.resize_all_columns();
    stack.resize_all_columns();
    assert!(stack.columns().all(|c| c.resizes == 2));
}

#[test]
fn test_drilling_scrolls_once_after_delay() {
    setup();
    let doc = garden_map();
    let scheduler = Arc::new(SharedTaskScheduler::new());
    let viewport = Arc::new(Viewport::default());
    let config = ColumnStackConfig::from_toml_str("scroll_delay_ms = 1000").unwrap();

    let mut stack = ColumnStack::with_host(Strip::default())
        .with_scroller(DeferredScroll::from_config(scheduler.clone(), &viewport, &config));
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];

    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();
    let garden_column = ids(&stack)[1];
    select(&mut stack, &doc.map, garden_column, doc.tomatoes).unwrap();

    // Nothing happens synchronously.
    assert_eq!(scheduler.process_ready(), 0);
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 0);

    scheduler.process_ready_at(Instant::now() + Duration::from_millis(2000));
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn test_worker_thread_posts_to_ui_scheduler() {
    setup();
    let scheduler = Arc::new(SharedTaskScheduler::new());
    let viewport = Arc::new(Viewport::default());

    // A background loader finishes and posts its scroll to the UI thread.
    let worker_scheduler = scheduler.clone();
    let worker_viewport = Arc::downgrade(&viewport);
    std::thread::spawn(move || {
        worker_scheduler.schedule_once(Duration::ZERO, move || {
            if let Some(viewport) = worker_viewport.upgrade() {
                viewport.scroll_to_end();
            }
        });
    })
    .join()
    .unwrap();

    assert_eq!(scheduler.process_ready_at(Instant::now() + Duration::from_millis(1)), 1);
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_closing_view_drops_pending_scroll() {
    setup();
    let doc = garden_map();
    let scheduler = Arc::new(SharedTaskScheduler::new());
    let viewport = Arc::new(Viewport::default());

    let mut stack = ColumnStack::with_host(Strip::default()).with_scroller(DeferredScroll::new(
        scheduler.clone(),
        &viewport,
        Duration::from_millis(100),
    ));
    stack.append(NodeColumn::for_node(&doc.map, doc.root));
    let root_column = ids(&stack)[0];
    select(&mut stack, &doc.map, root_column, doc.garden).unwrap();
    drop(stack);

    scheduler.process_ready_at(Instant::now() + Duration::from_millis(500));
    assert_eq!(viewport.scrolls.load(Ordering::SeqCst), 0);
}
