use super::*;
extern crate test;
use test::Bencher;

use sapling::{avl::AVLTree, red_black::RedBlackTree};

pub fn bench_tree<T>(b: &mut Bencher)
where
    T: SearchTree<i32> + FromIterator<i32>,
{
    let mut rng = rand::thread_rng();
    let mut tree: T = (-MAX_KEY..MAX_KEY).step_by(2).collect();
    b.iter(|| {
        let round_action = random_round_action(&mut rng);
        let res = run_round(&round_action, &mut tree);
        test::bench::black_box(res);
    });
}

#[bench]
fn bench_avl(b: &mut Bencher) {
    bench_tree::<AVLTree<_>>(b)
}

#[bench]
fn bench_red_black(b: &mut Bencher) {
    bench_tree::<RedBlackTree<_>>(b)
}

#[bench]
fn bench_avl_bulk_build(b: &mut Bencher) {
    b.iter(|| {
        let tree: AVLTree<i32> = (0..1000).collect();
        test::bench::black_box(tree.height())
    });
}

#[bench]
fn bench_red_black_bulk_build(b: &mut Bencher) {
    b.iter(|| {
        let tree: RedBlackTree<i32> = (0..1000).collect();
        test::bench::black_box(tree.height())
    });
}
