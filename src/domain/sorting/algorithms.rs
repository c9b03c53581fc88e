//! Reference sorting algorithms measured by the benchmark.
//!
//! All of them sort ascending and in place on the caller's slice.

/// Classic bubble sort with an early exit once a pass makes no swap.
///
/// Time complexity: O(n²)
/// Space complexity: O(1)
pub fn bubble_sort<T: Ord>(data: &mut [T]) {
    let len = data.len();
    if len <= 1 {
        return;
    }

    for pass in 0..len {
        let mut swapped = false;
        for j in 0..len - 1 - pass {
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// In-place heap sort on a max-heap.
///
/// Time complexity: O(n log n)
/// Space complexity: O(1)
pub fn heap_sort<T: Ord>(data: &mut [T]) {
    let len = data.len();
    if len <= 1 {
        return;
    }

    for start in (0..len / 2).rev() {
        sift_down(data, start, len);
    }

    for end in (1..len).rev() {
        data.swap(0, end);
        sift_down(data, 0, end);
    }
}

fn sift_down<T: Ord>(data: &mut [T], mut root: usize, end: usize) {
    loop {
        let left = 2 * root + 1;
        if left >= end {
            return;
        }

        let right = left + 1;
        let child = if right < end && data[right] > data[left] {
            right
        } else {
            left
        };

        if data[root] >= data[child] {
            return;
        }
        data.swap(root, child);
        root = child;
    }
}

/// Top-down stable merge sort using one scratch buffer for the whole run.
///
/// Time complexity: O(n log n)
/// Space complexity: O(n)
pub fn merge_sort<T: Ord + Clone>(data: &mut [T]) {
    if data.len() <= 1 {
        return;
    }
    let mut scratch = data.to_vec();
    merge_sort_into(&mut scratch, data);
}

// Sorts `dst` using `src` (same contents) as the auxiliary buffer.
fn merge_sort_into<T: Ord + Clone>(src: &mut [T], dst: &mut [T]) {
    let len = dst.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    {
        let (src_left, src_right) = src.split_at_mut(mid);
        let (dst_left, dst_right) = dst.split_at_mut(mid);
        // Roles swap each level so no extra copies are needed.
        merge_sort_into(dst_left, src_left);
        merge_sort_into(dst_right, src_right);
    }
    merge(&src[..mid], &src[mid..], dst);
}

fn merge<T: Ord + Clone>(left: &[T], right: &[T], out: &mut [T]) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // `<=` keeps equal elements in their original order.
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}
