//! Element-level array diff around a longest common subsequence.

use serde_json::Value;
use tracing::debug;

use super::{diff_at_path, DiffOptions};
use crate::json_equal::identical;
use crate::json_patch::types::{Op, Path};

/// Above this many LCS table cells the array is replaced whole.
const MAX_TABLE_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOpType {
    Eql,
    Del,
    Ins,
    /// A deleted element paired with an inserted one; diffed in place.
    Mix,
}

/// Edit script over `(type, src index, dst index)`. Indices that do not
/// apply to the type are left at zero.
type EditScript = Vec<(EditOpType, usize, usize)>;

pub(super) fn diff_lcs(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &[Value],
    dst: &[Value],
    options: &DiffOptions,
) {
    let Some(script) = edit_script(src, dst) else {
        debug!(src_len = src.len(), dst_len = dst.len(), "array too large for lcs, replacing");
        ops.push(Op::Replace {
            path: path.clone(),
            value: Value::Array(dst.to_vec()),
        });
        return;
    };

    // Position in the array as it stands after the ops emitted so far.
    let mut pos = 0usize;
    for (op_type, src_idx, dst_idx) in script {
        path.push(pos.to_string());
        match op_type {
            EditOpType::Eql => pos += 1,
            EditOpType::Del => ops.push(Op::Remove { path: path.clone() }),
            EditOpType::Ins => {
                ops.push(Op::Add {
                    path: path.clone(),
                    value: dst[dst_idx].clone(),
                });
                pos += 1;
            }
            EditOpType::Mix => {
                diff_at_path(ops, path, &src[src_idx], &dst[dst_idx], options);
                pos += 1;
            }
        }
        path.pop();
    }
}

/// Builds the edit script, or `None` when the table would be too large.
fn edit_script(src: &[Value], dst: &[Value]) -> Option<EditScript> {
    let prefix = src.iter().zip(dst).take_while(|(s, d)| identical(s, d)).count();
    let suffix = src[prefix..]
        .iter()
        .rev()
        .zip(dst[prefix..].iter().rev())
        .take_while(|(s, d)| identical(s, d))
        .count();
    let a = &src[prefix..src.len() - suffix];
    let b = &dst[prefix..dst.len() - suffix];

    let (n, m) = (a.len(), b.len());
    if (n + 1).saturating_mul(m + 1) > MAX_TABLE_CELLS {
        return None;
    }

    // lcs[i * (m + 1) + j] = LCS length of a[i..] and b[j..]
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if identical(&a[i], &b[j]) {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut script: EditScript = (0..prefix).map(|k| (EditOpType::Eql, k, k)).collect();
    let mut dels: Vec<usize> = Vec::new();
    let mut ins: Vec<usize> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && identical(&a[i], &b[j]) {
            flush_block(&mut script, &mut dels, &mut ins);
            script.push((EditOpType::Eql, prefix + i, prefix + j));
            i += 1;
            j += 1;
        } else if j == m || (i < n && lcs[(i + 1) * width + j] >= lcs[i * width + j + 1]) {
            dels.push(prefix + i);
            i += 1;
        } else {
            ins.push(prefix + j);
            j += 1;
        }
    }
    flush_block(&mut script, &mut dels, &mut ins);
    script.extend((0..suffix).map(|k| (EditOpType::Eql, prefix + n + k, prefix + m + k)));
    Some(script)
}

/// Turns a run of unmatched elements into paired in-place edits followed by
/// the leftover deletions or insertions.
fn flush_block(script: &mut EditScript, dels: &mut Vec<usize>, ins: &mut Vec<usize>) {
    let paired = dels.len().min(ins.len());
    for k in 0..paired {
        script.push((EditOpType::Mix, dels[k], ins[k]));
    }
    script.extend(dels[paired..].iter().map(|&d| (EditOpType::Del, d, 0)));
    script.extend(ins[paired..].iter().map(|&n| (EditOpType::Ins, 0, n)));
    dels.clear();
    ins.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(src: Value, dst: Value) -> Vec<EditOpType> {
        let (Value::Array(s), Value::Array(d)) = (src, dst) else {
            panic!("arrays expected");
        };
        edit_script(&s, &d).unwrap().into_iter().map(|(t, _, _)| t).collect()
    }

    #[test]
    fn equal_arrays_are_all_eql() {
        use EditOpType::*;
        assert_eq!(types(json!([1, 2, 3]), json!([1, 2, 3])), vec![Eql, Eql, Eql]);
        assert_eq!(types(json!([]), json!([])), Vec::<EditOpType>::new());
    }

    #[test]
    fn changed_element_becomes_mix() {
        use EditOpType::*;
        assert_eq!(types(json!([1, 2, 3]), json!([1, 9, 3])), vec![Eql, Mix, Eql]);
    }

    #[test]
    fn leftover_block_members_are_plain_edits() {
        use EditOpType::*;
        assert_eq!(types(json!([1, 2, 3, 4]), json!([1, 9, 4])), vec![Eql, Mix, Del, Eql]);
        assert_eq!(types(json!([1, 4]), json!([1, 8, 9, 4])), vec![Eql, Ins, Ins, Eql]);
    }

    #[test]
    fn indices_refer_to_untrimmed_arrays() {
        let src = [json!(0), json!(1), json!(2)];
        let dst = [json!(0), json!(5), json!(2)];
        assert_eq!(
            edit_script(&src, &dst).unwrap(),
            vec![(EditOpType::Eql, 0, 0), (EditOpType::Mix, 1, 1), (EditOpType::Eql, 2, 2)]
        );
    }
}
