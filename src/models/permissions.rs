use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl PermissionSet {
    fn from_masks(mode: u32, read: u32, write: u32, execute: u32) -> Self {
        Self {
            read: mode & read != 0,
            write: mode & write != 0,
            execute: mode & execute != 0,
        }
    }

    fn push_symbolic(&self, out: &mut String) {
        out.push(if self.read { 'r' } else { '-' });
        out.push(if self.write { 'w' } else { '-' });
        out.push(if self.execute { 'x' } else { '-' });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionBreakdown {
    pub octal: String,
    pub symbolic: String,
    pub owner: PermissionSet,
    pub group: PermissionSet,
    pub others: PermissionSet,
    pub uid: u32,
    pub gid: u32,
}

impl PermissionBreakdown {
    /// Decodes the low nine permission bits of a raw `st_mode`.
    pub fn from_mode(mode: u32, uid: u32, gid: u32) -> Self {
        let owner = PermissionSet::from_masks(mode, 0o400, 0o200, 0o100);
        let group = PermissionSet::from_masks(mode, 0o040, 0o020, 0o010);
        let others = PermissionSet::from_masks(mode, 0o004, 0o002, 0o001);

        let mut symbolic = String::with_capacity(9);
        for set in [&owner, &group, &others] {
            set.push_symbolic(&mut symbolic);
        }

        Self {
            octal: format!("{:03o}", mode & 0o777),
            symbolic,
            owner,
            group,
            others,
            uid,
            gid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_0644() {
        let p = PermissionBreakdown::from_mode(0o100644, 1000, 1000);
        assert_eq!(p.octal, "644");
        assert_eq!(p.symbolic, "rw-r--r--");
        assert_eq!(
            p.owner,
            PermissionSet {
                read: true,
                write: true,
                execute: false
            }
        );
        assert_eq!(
            p.group,
            PermissionSet {
                read: true,
                write: false,
                execute: false
            }
        );
        assert_eq!(p.others, p.group);
        assert_eq!((p.uid, p.gid), (1000, 1000));
    }

    #[test]
    fn decodes_directory_0755() {
        let p = PermissionBreakdown::from_mode(0o040755, 0, 0);
        assert_eq!(p.octal, "755");
        assert_eq!(p.symbolic, "rwxr-xr-x");
        assert!(p.owner.execute && p.group.execute && p.others.execute);
        assert!(!p.group.write);
    }

    #[test]
    fn octal_is_always_three_digits() {
        assert_eq!(PermissionBreakdown::from_mode(0o007, 0, 0).octal, "007");
        assert_eq!(PermissionBreakdown::from_mode(0, 0, 0).octal, "000");
        assert_eq!(PermissionBreakdown::from_mode(0o4755, 0, 0).octal, "755");
    }

    #[test]
    fn serializes_with_nested_sets() {
        let json = serde_json::to_value(PermissionBreakdown::from_mode(0o600, 1, 2)).unwrap();
        assert_eq!(json["octal"], "600");
        assert_eq!(json["owner"]["write"], true);
        assert_eq!(json["others"]["read"], false);
        assert_eq!(json["gid"], 2);
    }
}
