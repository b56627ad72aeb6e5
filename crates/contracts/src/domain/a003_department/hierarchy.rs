use std::collections::{HashMap, HashSet};

use super::aggregate::Department;

/// Arranges departments for display with one level of nesting.
///
/// Departments that already arrive with `subDepartments` keep them. Flat
/// entries whose `parent_department_id` resolves are attached under their
/// top-level ancestor; unresolvable parents and parent loops make the entry
/// a root. Input order is preserved.
pub fn build_hierarchy(departments: Vec<Department>) -> Vec<Department> {
    let parent_of: HashMap<i64, Option<i64>> = departments
        .iter()
        .map(|d| (d.id, d.parent_department_id))
        .collect();

    let top_ancestor = |id: i64| -> i64 {
        let mut current = id;
        let mut seen = HashSet::from([id]);
        while let Some(Some(parent)) = parent_of.get(&current) {
            if !parent_of.contains_key(parent) {
                break;
            }
            if !seen.insert(*parent) {
                return id;
            }
            current = *parent;
        }
        current
    };

    let mut roots: Vec<Department> = Vec::new();
    let mut children: HashMap<i64, Vec<Department>> = HashMap::new();

    for mut dept in departments {
        let anchor = top_ancestor(dept.id);
        if anchor == dept.id {
            roots.push(dept);
        } else {
            // Only one level is rendered, so grandchildren are flattened.
            let nested = std::mem::take(&mut dept.sub_departments);
            let bucket = children.entry(anchor).or_default();
            bucket.push(dept);
            bucket.extend(nested);
        }
    }

    for root in roots.iter_mut() {
        if let Some(extra) = children.remove(&root.id) {
            for child in extra {
                if !root.sub_departments.iter().any(|s| s.id == child.id) {
                    root.sub_departments.push(child);
                }
            }
        }
    }

    roots
}

/// Options for the parent select of the department form.
///
/// When editing, the department itself and everything below it are left
/// out, whether nested in `sub_departments` or linked by
/// `parent_department_id`, so a save can never create a cycle.
pub fn parent_candidates(
    parents: &[Department],
    editing: Option<&Department>,
) -> Vec<(i64, String)> {
    let mut excluded = HashSet::new();
    if let Some(editing) = editing {
        let mut stack = vec![editing];
        while let Some(dept) = stack.pop() {
            if excluded.insert(dept.id) {
                stack.extend(dept.sub_departments.iter());
            }
        }
        loop {
            let before = excluded.len();
            for d in parents {
                if d.parent_department_id.is_some_and(|p| excluded.contains(&p)) {
                    excluded.insert(d.id);
                }
            }
            if excluded.len() == before {
                break;
            }
        }
    }

    parents
        .iter()
        .filter(|d| !excluded.contains(&d.id))
        .map(|d| (d.id, d.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: i64, parent: Option<i64>) -> Department {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Dept {id}"),
            "parent_department_id": parent,
        }))
        .unwrap()
    }

    fn ids(items: &[Department]) -> Vec<i64> {
        items.iter().map(|d| d.id).collect()
    }

    #[test]
    fn attaches_flat_children_to_parents() {
        let tree = build_hierarchy(vec![dept(1, None), dept(2, Some(1)), dept(3, None), dept(4, Some(1))]);
        assert_eq!(ids(&tree), vec![1, 3]);
        assert_eq!(ids(&tree[0].sub_departments), vec![2, 4]);
        assert!(tree[1].sub_departments.is_empty());
    }

    #[test]
    fn grandchildren_are_flattened_under_top_ancestor() {
        let tree = build_hierarchy(vec![dept(1, None), dept(2, Some(1)), dept(5, Some(2))]);
        assert_eq!(ids(&tree), vec![1]);
        assert_eq!(ids(&tree[0].sub_departments), vec![2, 5]);
    }

    #[test]
    fn orphans_become_roots() {
        let tree = build_hierarchy(vec![dept(7, Some(99)), dept(8, None)]);
        assert_eq!(ids(&tree), vec![7, 8]);
    }

    #[test]
    fn parent_loops_do_not_hang() {
        let tree = build_hierarchy(vec![dept(1, Some(2)), dept(2, Some(1))]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn keeps_nested_payload_without_duplicates() {
        let mut parent = dept(1, None);
        parent.sub_departments.push(dept(2, Some(1)));
        let tree = build_hierarchy(vec![parent, dept(2, Some(1))]);
        assert_eq!(ids(&tree), vec![1]);
        assert_eq!(ids(&tree[0].sub_departments), vec![2]);
    }

    #[test]
    fn parent_options_skip_own_subtree() {
        let mut youth = dept(1, None);
        youth.sub_departments.push(dept(2, Some(1)));
        let parents = vec![dept(1, None), dept(2, Some(1)), dept(3, None), dept(5, Some(2))];

        let ids_of = |opts: Vec<(i64, String)>| opts.into_iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids_of(parent_candidates(&parents, Some(&youth))), vec![3]);
        assert_eq!(ids_of(parent_candidates(&parents, Some(&dept(2, Some(1))))), vec![1, 3]);
        assert_eq!(ids_of(parent_candidates(&parents, None)), vec![1, 2, 3, 5]);
    }
}
