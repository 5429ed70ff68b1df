//! Allocation and sharing behavior of composite values.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use style_color::{
    AbsoluteColor, ColorInterpolationMethod, ColorMix, MixComponent, StyleColor,
};

/// Counts allocations made by the current thread, so parallel tests do not
/// disturb each other.
struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn count_allocation(ptr: *mut u8) -> *mut u8 {
    if !ptr.is_null() {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
    }
    ptr
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        count_allocation(unsafe { System.alloc(layout) })
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        count_allocation(unsafe { System.alloc_zeroed(layout) })
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        count_allocation(unsafe { System.realloc(ptr, layout, new_size) })
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

fn sample_mix() -> StyleColor {
    StyleColor::mix(
        ColorInterpolationMethod::Srgb,
        MixComponent::new(StyleColor::current_color(), Some(40.0)),
        MixComponent::new(AbsoluteColor::RED.into(), None),
    )
    .unwrap()
}

#[test]
fn leaves_do_not_allocate() {
    let before = allocations();
    let absolute = StyleColor::from(AbsoluteColor::BLUE);
    let current = StyleColor::current_color();
    let copies = (absolute.clone(), current.clone());
    assert_eq!(allocations(), before);
    drop(copies);
}

#[test]
fn composite_construction_allocates_once() {
    let inner = sample_mix();
    let mix = ColorMix::new(
        ColorInterpolationMethod::Oklab,
        MixComponent::new(inner, Some(50.0)),
        MixComponent::new(StyleColor::current_color(), None),
    )
    .unwrap();

    let before = allocations();
    let outer = StyleColor::from(mix);
    assert_eq!(allocations() - before, 1);

    let children = [
        StyleColor::current_color(),
        AbsoluteColor::WHITE.into(),
        outer.clone(),
    ];
    let before = allocations();
    let layers = StyleColor::layers(children);
    assert_eq!(allocations() - before, 1);
    assert!(layers.is_color_layers());
}

#[test]
fn clones_share_one_node() {
    let before = allocations();
    let original = sample_mix();
    let allocated = allocations() - before;

    let before = allocations();
    let copy = original.clone();
    assert_eq!(allocations(), before);
    assert!(copy.shares_expression_with(&original));
    assert_eq!(original.expression_ref_count(), Some(2));

    drop(copy);
    assert_eq!(original.expression_ref_count(), Some(1));
    assert!(allocated >= 1);
}

#[test]
fn last_drop_frees_the_node() {
    let original = sample_mix();
    let weak = Arc::downgrade(original.as_expression().unwrap());
    let copy = original.clone();
    assert_eq!(weak.strong_count(), 2);

    drop(original);
    assert_eq!(weak.strong_count(), 1);
    drop(copy);
    assert_eq!(weak.strong_count(), 0);
    assert!(weak.upgrade().is_none());
}

#[test]
fn take_moves_without_touching_the_count() {
    let mut original = sample_mix();
    let keeper = original.clone();
    let moved = original.take();
    assert_eq!(keeper.expression_ref_count(), Some(2));
    assert!(!original.is_valid());
    assert!(moved.shares_expression_with(&keeper));
}

#[test]
fn shared_tree_resolves_on_many_threads() {
    let shared = StyleColor::layers([
        AbsoluteColor::rgba(0.0, 0.0, 1.0, 0.5).into(),
        sample_mix(),
    ]);
    let currents = [
        AbsoluteColor::BLACK,
        AbsoluteColor::WHITE,
        AbsoluteColor::LIME,
        AbsoluteColor::BLUE,
    ];
    let expected: Vec<_> = currents.iter().map(|c| shared.resolve(*c)).collect();

    let handles: Vec<_> = currents
        .into_iter()
        .map(|current| {
            let value = shared.clone();
            thread::spawn(move || value.resolve(current))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results, expected);
    assert_eq!(shared.expression_ref_count(), Some(1));
}
