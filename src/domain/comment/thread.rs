use crate::domain::comment::entity::{Comment, CommentId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// Nests a flat comment list by `parent_id`, oldest first at every level.
///
/// Replies whose parent is not in `comments` (for example because the parent
/// is still pending moderation) are left out of the thread.
pub fn build_thread(mut comments: Vec<Comment>) -> Vec<CommentNode> {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));

    let present: Vec<CommentId> = comments.iter().map(|c| c.id).collect();
    let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in comments {
        match comment.parent_id {
            None => roots.push(comment),
            Some(parent) if present.contains(&parent) => {
                children.entry(parent).or_default().push(comment);
            }
            Some(_) => {}
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(comment: Comment, children: &mut HashMap<CommentId, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, children))
        .collect();
    CommentNode { comment, replies }
}
