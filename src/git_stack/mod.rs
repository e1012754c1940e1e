use git2::Repository;

pub struct GitStack {
    pub repo: Repository,
}

// Re-export impl blocks
mod core;
mod push;
mod rebase;
