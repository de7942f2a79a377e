//! CFG fixtures
//!
//! Statement ids are numbered in source order; each fixture documents its
//! blocks.

use array_ssa_ir::{ProcedureCfg, Statement};

/// ```text
/// B0: s0 a = new int[10]
///     s1 a[i] = 1
///     s2 x = a[i]
/// ```
pub fn straight_line() -> ProcedureCfg {
    ProcedureCfg::builder("straight_line")
        .block(
            0,
            vec![
                Statement::create(0, 1, "a", "a = new int[10]"),
                Statement::write(1, 2, "a", "i", "a[i] = 1"),
                Statement::read(2, 3, "a", "i", "x = a[i]"),
            ],
        )
        .build()
        .expect("straight_line fixture")
}

/// ```text
/// B0: s0 a = new int[10]      → B1, B2
/// B1: s1 a[i] = 1             → B3
/// B2: s2 a[j] = 2             → B3
/// B3: s3 x = a[k]
/// ```
pub fn diamond() -> ProcedureCfg {
    ProcedureCfg::builder("diamond")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[10]")])
        .block(1, vec![Statement::write(1, 3, "a", "i", "a[i] = 1")])
        .block(2, vec![Statement::write(2, 5, "a", "j", "a[j] = 2")])
        .block(3, vec![Statement::read(3, 7, "a", "k", "x = a[k]")])
        .edge(0, 1)
        .edge(0, 2)
        .edge(1, 3)
        .edge(2, 3)
        .build()
        .expect("diamond fixture")
}

/// ```text
/// B0: s0 a = new int[n]; s1 i = 0          → B1
/// B1: s2 if i >= n goto B3                 → B2, B3 (exit)
/// B2: s3 t = a[i]; s4 a[i] = t + 1; s5 i++ → B1
/// B3: s6 x = a[i]
/// ```
pub fn simple_loop() -> ProcedureCfg {
    ProcedureCfg::builder("simple_loop")
        .block(
            0,
            vec![
                Statement::create(0, 1, "a", "a = new int[n]"),
                Statement::other(1, 2, "i = 0"),
            ],
        )
        .block(1, vec![Statement::other(2, 3, "if i >= n goto B3")])
        .block(
            2,
            vec![
                Statement::read(3, 4, "a", "i", "t = a[i]"),
                Statement::write(4, 5, "a", "i", "a[i] = t + 1"),
                Statement::other(5, 6, "i = i + 1"),
            ],
        )
        .block(3, vec![Statement::read(6, 8, "a", "i", "x = a[i]")])
        .edge(0, 1)
        .edge(1, 2)
        .edge(1, 3)
        .edge(2, 1)
        .loop_exit(1, 3)
        .build()
        .expect("simple_loop fixture")
}

/// ```text
/// B0: s0 a = new int[n]                      → B1
/// B1: s1 if i >= n goto B6                   → B2, B6 (exit)
/// B2: s2 j = 0                               → B3
/// B3: s3 if j >= m goto B5                   → B4, B5 (exit)
/// B4: s4 a[j] = j; s5 j = j + 1              → B3
/// B5: s6 y = a[j]; s7 a[i] = y; s8 i = i + 1 → B1
/// B6: s9 x = a[i]
/// ```
pub fn nested_loop() -> ProcedureCfg {
    ProcedureCfg::builder("nested_loop")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[n]")])
        .block(1, vec![Statement::other(1, 2, "if i >= n goto B6")])
        .block(2, vec![Statement::other(2, 3, "j = 0")])
        .block(3, vec![Statement::other(3, 4, "if j >= m goto B5")])
        .block(
            4,
            vec![
                Statement::write(4, 5, "a", "j", "a[j] = j"),
                Statement::other(5, 6, "j = j + 1"),
            ],
        )
        .block(
            5,
            vec![
                Statement::read(6, 7, "a", "j", "y = a[j]"),
                Statement::write(7, 8, "a", "i", "a[i] = y"),
                Statement::other(8, 9, "i = i + 1"),
            ],
        )
        .block(6, vec![Statement::read(9, 11, "a", "i", "x = a[i]")])
        .edge(0, 1)
        .edge(1, 2)
        .edge(1, 6)
        .edge(2, 3)
        .edge(3, 4)
        .edge(3, 5)
        .edge(4, 3)
        .edge(5, 1)
        .loop_exit(1, 6)
        .loop_exit(3, 5)
        .build()
        .expect("nested_loop fixture")
}

/// Both arms of the loop body write version 1 of `a`.
///
/// ```text
/// B0: s0 a = new int[n]          → B1
/// B1: s1 if i >= n goto B6       → B2, B3, B6 (exit)
/// B2: s2 a[i] = 1                → B5
/// B3: s3 a[j] = 2                → B4
/// B4: s4 x = a[j]                → B5
/// B5: s5 i = i + 1               → B1
/// B6: s6 z = a[k]
/// ```
pub fn branch_in_loop() -> ProcedureCfg {
    ProcedureCfg::builder("branch_in_loop")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[n]")])
        .block(1, vec![Statement::other(1, 2, "if i >= n goto B6")])
        .block(2, vec![Statement::write(2, 3, "a", "i", "a[i] = 1")])
        .block(3, vec![Statement::write(3, 5, "a", "j", "a[j] = 2")])
        .block(4, vec![Statement::read(4, 6, "a", "j", "x = a[j]")])
        .block(5, vec![Statement::other(5, 7, "i = i + 1")])
        .block(6, vec![Statement::read(6, 9, "a", "k", "z = a[k]")])
        .edge(0, 1)
        .edge(1, 2)
        .edge(1, 3)
        .edge(1, 6)
        .edge(2, 5)
        .edge(3, 4)
        .edge(4, 5)
        .edge(5, 1)
        .loop_exit(1, 6)
        .build()
        .expect("branch_in_loop fixture")
}

/// ```text
/// B0: s0 a = new int[10]     → B1, B2
/// B1: s1 c = new int[5]      → B3
/// B2: s2 y = 0               → B3
/// B3: s3 x = a[0]; s4 z = c[0]
/// ```
pub fn false_phi() -> ProcedureCfg {
    ProcedureCfg::builder("false_phi")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[10]")])
        .block(1, vec![Statement::create(1, 2, "c", "c = new int[5]")])
        .block(2, vec![Statement::other(2, 3, "y = 0")])
        .block(
            3,
            vec![
                Statement::read(3, 4, "a", "0", "x = a[0]"),
                Statement::read(4, 5, "c", "0", "z = c[0]"),
            ],
        )
        .edge(0, 1)
        .edge(0, 2)
        .edge(1, 3)
        .edge(2, 3)
        .build()
        .expect("false_phi fixture")
}

/// ```text
/// B0: s0 a = new int[10]     → B1, B2
/// B1: s1 x = a[i]            → B3
/// B2: s2 y = 0               → B3
/// B3: s3 z = a[k]
/// ```
pub fn read_on_one_branch() -> ProcedureCfg {
    ProcedureCfg::builder("read_on_one_branch")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[10]")])
        .block(1, vec![Statement::read(1, 2, "a", "i", "x = a[i]")])
        .block(2, vec![Statement::other(2, 3, "y = 0")])
        .block(3, vec![Statement::read(3, 4, "a", "k", "z = a[k]")])
        .edge(0, 1)
        .edge(0, 2)
        .edge(1, 3)
        .edge(2, 3)
        .build()
        .expect("read_on_one_branch fixture")
}

/// ```text
/// B0: s0 a = new int[10]     → B2
/// B1: s1 a[i] = 9            → B2   (no predecessors)
/// B2: s2 x = a[i]
/// ```
pub fn unreachable_predecessor() -> ProcedureCfg {
    ProcedureCfg::builder("unreachable_predecessor")
        .block(0, vec![Statement::create(0, 1, "a", "a = new int[10]")])
        .block(1, vec![Statement::write(1, 2, "a", "i", "a[i] = 9")])
        .block(2, vec![Statement::read(2, 3, "a", "i", "x = a[i]")])
        .edge(0, 2)
        .edge(1, 2)
        .build()
        .expect("unreachable_predecessor fixture")
}

/// ```text
/// B0: s0 x = a[i]
/// ```
pub fn read_before_write() -> ProcedureCfg {
    ProcedureCfg::builder("read_before_write")
        .block(0, vec![Statement::read(0, 1, "a", "i", "x = a[i]")])
        .build()
        .expect("read_before_write fixture")
}

/// ```text
/// B0: s0 a = new int[10]
///     s1 a[i] = 1
///     s2 y = a[i]
///     s3 b = a
///     s4 x = b[i]
/// ```
pub fn rename_after_write() -> ProcedureCfg {
    ProcedureCfg::builder("rename_after_write")
        .block(
            0,
            vec![
                Statement::create(0, 1, "a", "a = new int[10]"),
                Statement::write(1, 2, "a", "i", "a[i] = 1"),
                Statement::read(2, 3, "a", "i", "y = a[i]"),
                Statement::rename(3, 4, "a", "b", "b = a"),
                Statement::read(4, 5, "b", "i", "x = b[i]"),
            ],
        )
        .build()
        .expect("rename_after_write fixture")
}
