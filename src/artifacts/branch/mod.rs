//! Branch names and commit-ish resolution

pub mod branch_name;
pub mod revision;

/// Name of the reference naming the current branch
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};
