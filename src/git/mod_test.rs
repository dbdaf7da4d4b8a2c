use super::*;
use pretty_assertions::assert_eq;

fn create_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

#[test]
fn test_open_repo() {
    let (dir, _repo) = create_test_repo();
    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert!(matches!(git_repo.origin(), Err(Error::Git(_))));
}

#[test]
fn test_open_from_subdirectory() {
    let (dir, repo) = create_test_repo();
    repo.remote(ORIGIN_REMOTE, "https://github.com/owner/repo.git")
        .unwrap();
    let sub = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&sub).unwrap();
    assert_eq!(detect_origin(&sub).as_deref(), Some("github.com/owner/repo"));
}

#[test]
fn test_open_non_repo() {
    let dir = tempfile::tempdir().unwrap();
    assert!(GitRepo::open(dir.path()).is_err());
    assert_eq!(detect_origin(dir.path()), None);
}

#[test]
fn test_other_remotes_are_ignored() {
    let (dir, repo) = create_test_repo();
    repo.remote("upstream", "git@gitlab.com:group/proj.git")
        .unwrap();
    let git_repo = GitRepo::open(dir.path()).unwrap();
    assert!(matches!(git_repo.origin(), Err(Error::Git(_))));
}

#[test]
fn test_normalize_remote_url() {
    let cases = [
        ("git@github.com:owner/repo.git", "github.com/owner/repo"),
        ("https://github.com/owner/repo.git", "github.com/owner/repo"),
        ("https://github.com/owner/repo/", "github.com/owner/repo"),
        ("ssh://git@gitlab.example.com:2222/group/proj.git", "gitlab.example.com:2222/group/proj"),
        ("https://ci-token@gitlab.com/group/proj", "gitlab.com/group/proj"),
        ("gitlab.local:group/proj", "gitlab.local/group/proj"),
    ];
    for (url, want) in cases {
        assert_eq!(normalize_remote_url(url), want, "{url}");
    }
}
