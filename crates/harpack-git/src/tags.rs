//! Tag queries

use git2::{DescribeFormatOptions, DescribeOptions};
use tracing::debug;

use crate::repository::{GitRepo, Result};
use harpack_core::error::GitError;

impl GitRepo {
    /// Name of the most recent tag reachable from HEAD, or `None` when
    /// the repository has no reachable tags.
    ///
    /// Equivalent to `git describe --tags --abbrev=0`. Lightweight and
    /// annotated tags are both considered.
    pub fn latest_reachable_tag(&self) -> Result<Option<String>> {
        let mut opts = DescribeOptions::new();
        opts.describe_tags();

        // libgit2 reports "nothing to describe" either as NotFound or as
        // a generic error in the describe class, depending on version.
        let describe = match self.repo.describe(&opts) {
            Ok(describe) => describe,
            Err(e)
                if e.code() == git2::ErrorCode::NotFound
                    || e.class() == git2::ErrorClass::Describe =>
            {
                return Ok(None)
            }
            Err(e) => return Err(GitError::Git2(e)),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        let name = describe.format(Some(&format))?;
        debug!(tag = %name, "found latest reachable tag");
        Ok(Some(name))
    }
}
