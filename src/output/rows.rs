//! Flat row construction
//!
//! Inputs are already normalized; nothing here validates or mutates.

use crate::pipeline::UserBranch;
use crate::record::{Comment, Post, ResultRow, User};

/// Combines one user, one post, and one comment into a flat output record
pub fn build_row(user: &User, post: &Post, comment: &Comment) -> ResultRow {
    ResultRow {
        user_id: user.id,
        user_name: user.name.clone(),
        post_id: post.id,
        post_title: post.title.clone(),
        comment_id: comment.id,
        comment_body: comment.body.clone(),
        comment_email: comment.email.clone(),
    }
}

/// Walks the result tree in order, one row per (user, post, comment) triple
///
/// Row order follows the tree: users in fetch order, then each user's selected
/// posts, then each post's selected comments.
pub fn flatten_rows(tree: &[UserBranch]) -> Vec<ResultRow> {
    let mut rows = Vec::new();

    for branch in tree {
        for post_branch in &branch.posts {
            for comment in &post_branch.comments {
                rows.push(build_row(&branch.user, &post_branch.post, comment));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PostBranch;

    fn sample_user() -> User {
        User {
            id: 2,
            name: "B".to_string(),
        }
    }

    fn sample_post(id: u64) -> Post {
        Post {
            id,
            user_id: 2,
            title: format!("post {}", id),
        }
    }

    fn sample_comment(id: u64) -> Comment {
        Comment {
            id,
            post_id: 10,
            body: format!("body {}", id),
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_build_row_maps_all_fields() {
        let row = build_row(&sample_user(), &sample_post(10), &sample_comment(7));

        assert_eq!(row.user_id, 2);
        assert_eq!(row.user_name, "B");
        assert_eq!(row.post_id, 10);
        assert_eq!(row.post_title, "post 10");
        assert_eq!(row.comment_id, 7);
        assert_eq!(row.comment_body, "body 7");
        assert_eq!(row.comment_email, "a@b.com");
    }

    #[test]
    fn test_flatten_follows_tree_order() {
        let tree = vec![UserBranch {
            user: sample_user(),
            posts: vec![
                PostBranch {
                    post: sample_post(11),
                    comments: vec![sample_comment(5), sample_comment(3)],
                },
                PostBranch {
                    post: sample_post(10),
                    comments: vec![sample_comment(9)],
                },
            ],
        }];

        let rows = flatten_rows(&tree);

        let ids: Vec<(u64, u64)> = rows.iter().map(|r| (r.post_id, r.comment_id)).collect();
        assert_eq!(ids, vec![(11, 5), (11, 3), (10, 9)]);
    }

    #[test]
    fn test_empty_tree_yields_no_rows() {
        assert!(flatten_rows(&[]).is_empty());
    }

    #[test]
    fn test_user_with_no_posts_yields_no_rows() {
        let tree = vec![UserBranch {
            user: sample_user(),
            posts: vec![],
        }];
        assert!(flatten_rows(&tree).is_empty());
    }
}
