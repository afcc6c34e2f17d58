// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Unit rotations used by the complex magnitude kernel.
//!
//! Row `k` holds `(cos θk, -sin θk)` with `θk = 45° / 2^k`. Rotating a vector
//! in the first quadrant by each row in turn (folding back into the first
//! quadrant between rows) drives it onto the positive real axis.

/// 16-bit table in Q15.
pub static ROT_TABLE_S16: [(i32, i32); 14] = [
    (0x5A82, -0x5A82),
    (0x7642, -0x30FC),
    (0x7D8A, -0x18F9),
    (0x7F62, -0x0C8C),
    (0x7FD9, -0x0648),
    (0x7FF6, -0x0324),
    (0x7FFE, -0x0192),
    (0x7FFF, -0x00C9),
    (0x7FFF, -0x0065),
    (0x7FFF, -0x0032),
    (0x7FFF, -0x0019),
    (0x7FFF, -0x000D),
    (0x7FFF, -0x0006),
    (0x7FFF, -0x0003),
];

/// 32-bit table in Q30.
pub static ROT_TABLE_S32: [(i32, i32); 30] = [
    (759250125, -759250125),
    (992008094, -410903207),
    (1053110176, -209476638),
    (1068571464, -105245103),
    (1072448455, -52686014),
    (1073418433, -26350943),
    (1073660973, -13176464),
    (1073721611, -6588356),
    (1073736771, -3294193),
    (1073740561, -1647099),
    (1073741508, -823550),
    (1073741745, -411775),
    (1073741804, -205887),
    (1073741819, -102944),
    (1073741823, -51472),
    (1073741824, -25736),
    (1073741824, -12868),
    (1073741824, -6434),
    (1073741824, -3217),
    (1073741824, -1608),
    (1073741824, -804),
    (1073741824, -402),
    (1073741824, -201),
    (1073741824, -101),
    (1073741824, -50),
    (1073741824, -25),
    (1073741824, -13),
    (1073741824, -6),
    (1073741824, -3),
    (1073741824, -2),
];
