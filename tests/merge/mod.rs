mod merge_ancestor_branch;
mod merge_fast_forward;
