pub(crate) mod init_git;
pub(crate) mod meta;
pub(crate) mod output;
pub(crate) mod provider;
