//! The reconcile/orchestrate pipeline.
//!
//! ## Stage order
//!
//! 1. Prepare workspace (`clean`, ensure root — skipped when dry).
//! 2. Discover remote languages.
//! 3. Read the local reference tree; empty ⇒ jump straight to the pull.
//! 4. List blobs once for the project's privacy flag.
//! 5. Fan-out per namespace: fetch remote reference content, diff.
//! 6. Fan-out per namespace: push reference changes, then propagate
//!    removals to every other language (inner fan-out).
//! 7. Settle delay when something was pushed.
//! 8. Pull the merged set back to disk (stale-language cleanup first).
//!
//! Push strictly precedes pull: the diff was computed against a snapshot of
//! remote state, and pulling concurrently could read a half-applied store.
//! Within a stage, fan-out workers run on scoped threads and the scope is
//! the fan-in barrier; the first error wins and no sibling is retried.

use std::time::Duration;

use loctree_core::{BlobDescriptor, LanguageCode, LocalNamespace, NamespaceName};
use loctree_remote::{RemoteStore, UpdatePayload};

use crate::diff::Diff;
use crate::error::SyncError;
use crate::options::SyncOptions;
use crate::writer::WriteResult;
use crate::{reader, writer};

/// How long to wait between push and pull when changes were pushed. An
/// eventual-consistency accommodation, not a correctness guarantee.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What the push stage decided for one namespace.
#[derive(Debug, Clone)]
pub struct NamespacePush {
    pub namespace: NamespaceName,
    pub diff: Diff,
    /// The diff changed the key set (additions or removals).
    pub structural: bool,
}

/// Outcome of a full synchronization run.
#[derive(Debug)]
pub struct SyncReport {
    /// Per-namespace push decisions, empty on a fresh checkout.
    pub pushes: Vec<NamespacePush>,
    /// Per-blob outcomes of the final pull.
    pub writes: Vec<WriteResult>,
    /// Whether any namespace had structural changes to push.
    pub pushed_something: bool,
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

/// Run `work` over `items` on scoped threads and collect the results.
///
/// The scope is the fan-in barrier: every worker finishes (or the scope
/// joins it on early return) before this function returns. The first error
/// in item order is surfaced; siblings are never retried.
fn fan_out<T, R, F>(items: Vec<T>, work: F) -> Result<Vec<R>, SyncError>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R, SyncError> + Sync,
{
    std::thread::scope(|scope| {
        let work = &work;
        let handles: Vec<_> = items
            .into_iter()
            .map(|item| scope.spawn(move || work(item)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// sync
// ---------------------------------------------------------------------------

/// Run one full synchronization: reconcile the local reference tree with
/// the remote store, then pull the merged language set back to disk.
///
/// Safe to re-run: a clean sync followed by another sync pushes nothing.
/// The engine provides no cross-run locking; concurrent runs against the
/// same project/version or local root must be serialized by the caller.
pub fn sync<R: RemoteStore + ?Sized>(
    opt: &SyncOptions,
    remote: &R,
) -> Result<SyncReport, SyncError> {
    if !opt.dry {
        if opt.clean {
            writer::clean_root(opt)?;
        }
        writer::ensure_root(opt)?;
    }

    let remote_languages = remote.list_languages()?;
    tracing::debug!("remote languages: {remote_languages:?}");

    let local = reader::read_reference(opt)?;
    if local.is_empty() {
        // Fresh checkout: nothing to reconcile, clone the full remote set.
        let writes = pull(opt, remote, &remote_languages, false)?;
        return Ok(SyncReport {
            pushes: Vec::new(),
            writes,
            pushed_something: false,
        });
    }

    // The raw listing carries the project's privacy flag, which every
    // namespace fetch must echo.
    let blobs = remote.list_blobs()?;
    let is_private = blobs.first().map(|blob| blob.is_private).unwrap_or(false);

    let compared = fan_out(local, |ns| {
        let (remote_content, _) =
            remote.fetch_namespace(&opt.reference_language, &ns.namespace, is_private)?;
        let diff = Diff::between(&ns.content, &remote_content);
        Ok((ns, diff))
    })?;

    let pushes = fan_out(compared, |(ns, diff)| {
        push_namespace(opt, remote, &remote_languages, ns, diff)
    })?;

    // Explicit reduction after the barrier, not a flag shared by workers.
    let pushed_something = pushes.iter().any(|push| push.structural);

    if pushed_something && !opt.dry {
        tracing::info!(
            "waiting {:?} for pushed changes to become visible",
            opt.settle_delay
        );
        std::thread::sleep(opt.settle_delay);
    }

    let writes = pull(opt, remote, &remote_languages, pushed_something)?;
    Ok(SyncReport {
        pushes,
        writes,
        pushed_something,
    })
}

/// Push one namespace's reference-language changes, then propagate its
/// removals to every other known language so deleted keys do not linger as
/// orphans. The inner fan-out completes before the namespace counts as done.
fn push_namespace<R: RemoteStore + ?Sized>(
    opt: &SyncOptions,
    remote: &R,
    remote_languages: &[LanguageCode],
    ns: LocalNamespace,
    diff: Diff,
) -> Result<NamespacePush, SyncError> {
    let payload = build_payload(&ns, &diff, opt.update_values);
    let structural = diff.is_structural();

    if !payload.is_empty() && !opt.dry {
        remote.push_changes(&opt.reference_language, &ns.namespace, &payload)?;

        if !diff.to_remove.is_empty() {
            let removals: UpdatePayload = diff
                .to_remove
                .iter()
                .map(|key| (key.clone(), None))
                .collect();
            let others: Vec<&LanguageCode> = remote_languages
                .iter()
                .filter(|language| **language != opt.reference_language)
                .collect();
            fan_out(others, |language| {
                remote
                    .push_changes(language, &ns.namespace, &removals)
                    .map_err(SyncError::from)
            })?;
        }
    }

    Ok(NamespacePush {
        namespace: ns.namespace,
        diff,
        structural,
    })
}

/// Removals map to `null`, additions to their local value, updates to their
/// local value only under the `update_values` policy.
fn build_payload(ns: &LocalNamespace, diff: &Diff, update_values: bool) -> UpdatePayload {
    let mut payload = UpdatePayload::new();
    for key in &diff.to_remove {
        payload.insert(key.clone(), None);
    }
    for key in &diff.to_add {
        if let Some(value) = ns.content.get(key) {
            payload.insert(key.clone(), Some(value.clone()));
        }
    }
    if update_values {
        for key in &diff.to_update {
            if let Some(value) = ns.content.get(key) {
                payload.insert(key.clone(), Some(value.clone()));
            }
        }
    }
    payload
}

// ---------------------------------------------------------------------------
// Pull
// ---------------------------------------------------------------------------

/// Pull the full merged language set back to disk.
///
/// `omit_reference` drops the reference language's blobs from the download
/// set; the orchestrator passes `pushed_something`, because right after a
/// push the local reference *is* the content just made authoritative.
fn pull<R: RemoteStore + ?Sized>(
    opt: &SyncOptions,
    remote: &R,
    remote_languages: &[LanguageCode],
    omit_reference: bool,
) -> Result<Vec<WriteResult>, SyncError> {
    if !opt.dry {
        writer::cleanup_languages(opt, remote_languages)?;
    }

    let mut blobs = remote.list_blobs()?;
    ensure_all_namespaces(opt, remote_languages, &mut blobs);
    if omit_reference {
        blobs.retain(|blob| blob.language != opt.reference_language);
    }

    fan_out(blobs, |blob| {
        let (content, _) = remote.fetch_namespace(&blob.language, &blob.namespace, blob.is_private)?;
        if opt.skip_empty && content.is_empty() {
            tracing::debug!(
                "skipping empty namespace {} for {}",
                blob.namespace,
                blob.language
            );
            return Ok(WriteResult::SkippedEmpty {
                language: blob.language,
                namespace: blob.namespace,
            });
        }

        let target = opt.namespace_file(&blob.language, &blob.namespace);
        let bytes = loctree_codecs::encode(opt.format, &content, &blob.language).map_err(
            |source| SyncError::InvalidContent {
                path: target.clone(),
                format: opt.format,
                source,
            },
        )?;
        if opt.dry {
            return Ok(WriteResult::WouldWrite { path: target });
        }
        writer::write_namespace(&target, &bytes)
    })
}

/// Synthesize descriptors for every (language, namespace) pair missing
/// relative to the reference language's namespace set, so each language
/// ends up with a file per namespace even if never translated. Synthesized
/// descriptors have no modification time and zero size.
fn ensure_all_namespaces(
    opt: &SyncOptions,
    remote_languages: &[LanguageCode],
    blobs: &mut Vec<BlobDescriptor>,
) {
    let namespaces: Vec<NamespaceName> = blobs
        .iter()
        .filter(|blob| blob.language == opt.reference_language)
        .map(|blob| blob.namespace.clone())
        .collect();
    let project_private = blobs.first().map(|blob| blob.is_private).unwrap_or(false);

    for language in remote_languages {
        for namespace in &namespaces {
            let exists = blobs
                .iter()
                .any(|blob| blob.language == *language && blob.namespace == *namespace);
            if !exists {
                blobs.push(BlobDescriptor {
                    language: language.clone(),
                    namespace: namespace.clone(),
                    last_modified: None,
                    size: 0,
                    url: format!(
                        "{}/{}/{}/{}/{}",
                        opt.api_path, opt.project_id, opt.version, language, namespace
                    ),
                    is_private: project_private,
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{DateTime, Utc};
    use loctree_core::{Format, NamespaceContent};
    use loctree_remote::RemoteError;
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct PushRecord {
        language: LanguageCode,
        namespace: NamespaceName,
        payload: UpdatePayload,
    }

    /// In-memory remote store: pushes apply immediately, so the pull stage
    /// observes exactly what the push stage wrote. Every `fetch_namespace`
    /// call is logged with the privacy flag it was given.
    #[derive(Default)]
    struct FakeRemote {
        languages: Vec<LanguageCode>,
        is_private: bool,
        namespaces: Mutex<HashMap<(LanguageCode, NamespaceName), NamespaceContent>>,
        pushes: Mutex<Vec<PushRecord>>,
        fetches: Mutex<Vec<(LanguageCode, NamespaceName, bool)>>,
    }

    impl FakeRemote {
        fn new(languages: &[&str]) -> Self {
            Self {
                languages: languages.iter().map(|l| LanguageCode::from(*l)).collect(),
                ..Default::default()
            }
        }

        fn private(languages: &[&str]) -> Self {
            Self {
                is_private: true,
                ..Self::new(languages)
            }
        }

        fn seed(&self, language: &str, namespace: &str, entries: &[(&str, &str)]) {
            let content: NamespaceContent = entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.namespaces
                .lock()
                .unwrap()
                .insert((language.into(), namespace.into()), content);
        }

        fn content(&self, language: &str, namespace: &str) -> Option<NamespaceContent> {
            self.namespaces
                .lock()
                .unwrap()
                .get(&(language.into(), namespace.into()))
                .cloned()
        }

        fn push_log(&self) -> Vec<PushRecord> {
            self.pushes.lock().unwrap().clone()
        }

        fn fetch_log(&self) -> Vec<(LanguageCode, NamespaceName, bool)> {
            self.fetches.lock().unwrap().clone()
        }
    }

    impl RemoteStore for FakeRemote {
        fn list_languages(&self) -> Result<Vec<LanguageCode>, RemoteError> {
            Ok(self.languages.clone())
        }

        fn list_blobs(&self) -> Result<Vec<BlobDescriptor>, RemoteError> {
            let namespaces = self.namespaces.lock().unwrap();
            let mut blobs: Vec<BlobDescriptor> = namespaces
                .iter()
                .map(|((language, namespace), content)| BlobDescriptor {
                    language: language.clone(),
                    namespace: namespace.clone(),
                    last_modified: Some(Utc::now()),
                    size: content.len() as u64,
                    url: String::new(),
                    is_private: self.is_private,
                })
                .collect();
            blobs.sort_by(|a, b| {
                (&a.language, &a.namespace).cmp(&(&b.language, &b.namespace))
            });
            Ok(blobs)
        }

        fn fetch_namespace(
            &self,
            language: &LanguageCode,
            namespace: &NamespaceName,
            is_private: bool,
        ) -> Result<(NamespaceContent, Option<DateTime<Utc>>), RemoteError> {
            self.fetches
                .lock()
                .unwrap()
                .push((language.clone(), namespace.clone(), is_private));
            let content = self
                .namespaces
                .lock()
                .unwrap()
                .get(&(language.clone(), namespace.clone()))
                .cloned()
                .unwrap_or_default();
            Ok((content, None))
        }

        fn push_changes(
            &self,
            language: &LanguageCode,
            namespace: &NamespaceName,
            payload: &UpdatePayload,
        ) -> Result<(), RemoteError> {
            let mut namespaces = self.namespaces.lock().unwrap();
            let content = namespaces
                .entry((language.clone(), namespace.clone()))
                .or_default();
            for (key, value) in payload {
                match value {
                    Some(value) => {
                        content.insert(key.clone(), value.clone());
                    }
                    None => {
                        content.remove(key);
                    }
                }
            }
            drop(namespaces);
            self.pushes.lock().unwrap().push(PushRecord {
                language: language.clone(),
                namespace: namespace.clone(),
                payload: payload.clone(),
            });
            Ok(())
        }
    }

    fn options(root: &Path) -> SyncOptions {
        SyncOptions {
            project_id: "proj".into(),
            version: "latest".into(),
            api_path: "https://api.example.com".into(),
            api_key: None,
            path: root.to_path_buf(),
            reference_language: LanguageCode::from("en"),
            format: Format::Json,
            language_folder_prefix: String::new(),
            dry: false,
            clean: false,
            skip_empty: false,
            update_values: false,
            settle_delay: Duration::ZERO,
        }
    }

    fn write_reference(root: &Path, namespace: &str, json: &str) {
        let dir = root.join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{namespace}.json")), json).unwrap();
    }

    fn read_written(path: &Path) -> NamespaceContent {
        let bytes = fs::read(path).unwrap();
        loctree_codecs::decode(Format::Json, &bytes, &LanguageCode::from("en")).unwrap()
    }

    #[test]
    fn addition_is_pushed_and_not_propagated() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hi"}"#);
        let remote = FakeRemote::new(&["en", "de"]);

        let report = sync(&options(root.path()), &remote).unwrap();

        let log = remote.push_log();
        assert_eq!(log.len(), 1, "additions must not propagate: {log:?}");
        assert_eq!(log[0].language, LanguageCode::from("en"));
        assert_eq!(log[0].namespace, NamespaceName::from("common"));
        assert_eq!(
            log[0].payload.get("greeting"),
            Some(&Some("hi".to_string()))
        );
        assert!(report.pushed_something);

        // Removals landed nowhere, so `de` received the namespace only via
        // the synthesized-descriptor pull.
        let de_file = root.path().join("de").join("common.json");
        assert!(de_file.exists());
        assert!(read_written(&de_file).is_empty());

        // Reference was just made authoritative remotely; its local file
        // is left as authored.
        let en_bytes = fs::read(root.path().join("en").join("common.json")).unwrap();
        assert_eq!(en_bytes, br#"{"greeting": "hi"}"#);
    }

    #[test]
    fn removal_is_pushed_and_propagated_to_all_languages() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", "{}");
        let remote = FakeRemote::new(&["en", "de", "fr"]);
        remote.seed("en", "common", &[("greeting", "hi")]);
        remote.seed("de", "common", &[("greeting", "hallo")]);
        remote.seed("fr", "common", &[("greeting", "salut")]);

        let report = sync(&options(root.path()), &remote).unwrap();
        assert!(report.pushed_something);

        let log = remote.push_log();
        assert_eq!(log.len(), 3, "reference push plus two propagations");
        for record in &log {
            assert_eq!(record.payload.get("greeting"), Some(&None));
        }
        let languages: Vec<_> = log.iter().map(|r| r.language.clone()).collect();
        assert!(languages.contains(&LanguageCode::from("en")));
        assert!(languages.contains(&LanguageCode::from("de")));
        assert!(languages.contains(&LanguageCode::from("fr")));

        assert!(remote.content("de", "common").unwrap().is_empty());
        assert!(remote.content("fr", "common").unwrap().is_empty());
    }

    #[test]
    fn dry_run_computes_the_same_diff_but_touches_nothing() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hi"}"#);
        let remote = FakeRemote::new(&["en", "de"]);
        remote.seed("de", "common", &[("greeting", "hallo")]);

        let mut opt = options(root.path());
        opt.dry = true;
        let report = sync(&opt, &remote).unwrap();

        assert!(remote.push_log().is_empty(), "dry-run must not push");
        assert_eq!(report.pushes.len(), 1);
        assert_eq!(report.pushes[0].diff.to_add, vec!["greeting"]);
        assert!(report.pushed_something, "the diff itself is still computed");

        // The pull pipeline ran (fetch + convert) but wrote nothing.
        assert!(report
            .writes
            .iter()
            .all(|w| matches!(w, WriteResult::WouldWrite { .. })));
        assert!(!root.path().join("de").exists(), "dry-run must not mkdir");
    }

    #[test]
    fn fresh_checkout_pulls_everything_without_diffing() {
        let root = TempDir::new().unwrap();
        let remote = FakeRemote::new(&["en", "de"]);
        remote.seed("en", "common", &[("greeting", "hi")]);
        remote.seed("de", "common", &[("greeting", "hallo")]);

        let report = sync(&options(root.path()), &remote).unwrap();

        assert!(report.pushes.is_empty());
        assert!(!report.pushed_something);
        assert!(remote.push_log().is_empty());

        let en = read_written(&root.path().join("en").join("common.json"));
        assert_eq!(en.get("greeting").map(String::as_str), Some("hi"));
        let de = read_written(&root.path().join("de").join("common.json"));
        assert_eq!(de.get("greeting").map(String::as_str), Some("hallo"));
    }

    #[test]
    fn skip_empty_omits_empty_namespaces_from_the_pull() {
        let root = TempDir::new().unwrap();
        let remote = FakeRemote::new(&["en", "de"]);
        remote.seed("en", "common", &[("greeting", "hi")]);
        remote.seed("de", "common", &[]);

        let mut opt = options(root.path());
        opt.skip_empty = true;
        let report = sync(&opt, &remote).unwrap();

        assert!(root.path().join("en").join("common.json").exists());
        assert!(!root.path().join("de").join("common.json").exists());
        assert!(report.writes.iter().any(|w| matches!(
            w,
            WriteResult::SkippedEmpty { language, .. } if *language == LanguageCode::from("de")
        )));
    }

    #[test]
    fn second_run_after_clean_sync_pushes_nothing() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hi"}"#);
        let remote = FakeRemote::new(&["en", "de"]);

        let first = sync(&options(root.path()), &remote).unwrap();
        assert!(first.pushed_something);
        let pushes_after_first = remote.push_log().len();

        let second = sync(&options(root.path()), &remote).unwrap();
        assert!(!second.pushed_something, "second run must be a no-op push");
        assert!(second.pushes.iter().all(|p| p.diff.is_empty()));
        assert_eq!(remote.push_log().len(), pushes_after_first);
    }

    #[test]
    fn update_values_gates_value_changes() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hello there"}"#);
        let remote = FakeRemote::new(&["en"]);
        remote.seed("en", "common", &[("greeting", "hi")]);

        // Without the policy: value drift is reported but not pushed, and
        // the final pull (nothing structural, so the reference is not
        // omitted) reverts the local edit to the remote value.
        let report = sync(&options(root.path()), &remote).unwrap();
        assert_eq!(report.pushes[0].diff.to_update, vec!["greeting"]);
        assert!(!report.pushed_something);
        assert!(remote.push_log().is_empty());
        let en = read_written(&root.path().join("en").join("common.json"));
        assert_eq!(en.get("greeting").map(String::as_str), Some("hi"));

        // With the policy: the changed value lands remotely.
        write_reference(root.path(), "common", r#"{"greeting": "hello there"}"#);
        let mut opt = options(root.path());
        opt.update_values = true;
        let report = sync(&opt, &remote).unwrap();
        assert!(!report.pushed_something, "value updates are not structural");
        assert_eq!(remote.push_log().len(), 1);
        assert_eq!(
            remote.content("en", "common").unwrap().get("greeting"),
            Some(&"hello there".to_string())
        );
    }

    #[test]
    fn stale_local_languages_are_cleaned_up() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hi"}"#);
        fs::create_dir_all(root.path().join("fr")).unwrap();
        let remote = FakeRemote::new(&["en", "de"]);

        sync(&options(root.path()), &remote).unwrap();

        assert!(!root.path().join("fr").exists(), "fr is unknown remotely");
        assert!(root.path().join("de").exists());
        assert!(root.path().join("en").exists());
    }

    #[test]
    fn clean_wipes_the_root_first() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("stray.txt"), "x").unwrap();
        let remote = FakeRemote::new(&["en"]);
        remote.seed("en", "common", &[("greeting", "hi")]);

        let mut opt = options(root.path());
        opt.clean = true;
        sync(&opt, &remote).unwrap();

        assert!(!root.path().join("stray.txt").exists());
        assert!(root.path().join("en").join("common.json").exists());
    }

    #[test]
    fn dry_clean_does_not_wipe() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("stray.txt"), "x").unwrap();
        let remote = FakeRemote::new(&["en"]);

        let mut opt = options(root.path());
        opt.clean = true;
        opt.dry = true;
        sync(&opt, &remote).unwrap();

        assert!(root.path().join("stray.txt").exists());
    }

    #[test]
    fn pull_synthesizes_missing_language_namespace_pairs() {
        let root = TempDir::new().unwrap();
        let remote = FakeRemote::new(&["en", "de", "fr"]);
        remote.seed("en", "common", &[("greeting", "hi")]);
        remote.seed("en", "about", &[("title", "About")]);
        remote.seed("de", "common", &[("greeting", "hallo")]);

        sync(&options(root.path()), &remote).unwrap();

        // Every language gets a file per reference namespace, even empty.
        for language in ["en", "de", "fr"] {
            for namespace in ["common", "about"] {
                let file = root.path().join(language).join(format!("{namespace}.json"));
                assert!(file.exists(), "missing {language}/{namespace}");
            }
        }
        assert!(read_written(&root.path().join("fr").join("common.json")).is_empty());
    }

    #[test]
    fn private_projects_echo_the_privacy_flag_on_every_fetch() {
        let root = TempDir::new().unwrap();
        write_reference(root.path(), "common", r#"{"greeting": "hi"}"#);
        let remote = FakeRemote::private(&["en", "de"]);
        remote.seed("en", "common", &[("greeting", "hi")]);

        sync(&options(root.path()), &remote).unwrap();

        let log = remote.fetch_log();
        assert!(
            log.iter().all(|(_, _, is_private)| *is_private),
            "every fetch must carry the project's privacy flag: {log:?}"
        );
        // The diff-stage fetch of the reference namespace.
        assert!(log.contains(&(
            LanguageCode::from("en"),
            NamespaceName::from("common"),
            true
        )));
        // The pull fetch of the synthesized de/common descriptor, which
        // inherits the privacy flag rather than defaulting it.
        assert!(log.contains(&(
            LanguageCode::from("de"),
            NamespaceName::from("common"),
            true
        )));
        assert!(root.path().join("de").join("common.json").exists());
    }

    #[test]
    fn remote_failure_aborts_the_run() {
        struct FailingRemote;
        impl RemoteStore for FailingRemote {
            fn list_languages(&self) -> Result<Vec<LanguageCode>, RemoteError> {
                Err(RemoteError::Api {
                    message: "no such project".into(),
                })
            }
            fn list_blobs(&self) -> Result<Vec<BlobDescriptor>, RemoteError> {
                unreachable!("language discovery fails first")
            }
            fn fetch_namespace(
                &self,
                _: &LanguageCode,
                _: &NamespaceName,
                _: bool,
            ) -> Result<(NamespaceContent, Option<DateTime<Utc>>), RemoteError> {
                unreachable!()
            }
            fn push_changes(
                &self,
                _: &LanguageCode,
                _: &NamespaceName,
                _: &UpdatePayload,
            ) -> Result<(), RemoteError> {
                unreachable!()
            }
        }

        let root = TempDir::new().unwrap();
        let err = sync(&options(root.path()), &FailingRemote).unwrap_err();
        assert!(matches!(err, SyncError::Remote(RemoteError::Api { .. })));
    }
}
