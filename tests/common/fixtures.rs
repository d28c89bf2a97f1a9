//! Reusable test content.

#![allow(dead_code)]

/// Stub for the bundler and the type-checker.
///
/// Appends its arguments to `$STUB_LOG` as one line, copies a synthesized entry file
/// (first argument) to `$STUB_LOG.entries`, writes `--outfile`,
/// fails when the output path mentions "broken", sleeps `$STUB_SLEEP`
/// seconds in one-shot mode and keeps running when `--watch` is passed
/// (unless `$STUB_WATCH_EXIT` names an exit code).
pub const STUB_COMPILER: &str = r#"#!/bin/sh
printf '%s\n' "$(printf '%s' "$*" | tr '\n' ' ')" >> "$STUB_LOG"
case "$1" in
  *__bundle_entry__.ts) cat "$1" >> "$STUB_LOG.entries" ;;
esac
out=""
watch=""
for arg in "$@"; do
  case "$arg" in
    --outfile=*) out="${arg#--outfile=}" ;;
    --watch) watch=1 ;;
  esac
done
case "$out" in
  *broken*) echo "error: cannot compile $out" >&2; exit 1 ;;
esac
if [ -z "$watch" ] && [ -n "$STUB_SLEEP" ]; then
  sleep "$STUB_SLEEP"
fi
if [ -n "$out" ]; then
  mkdir -p "$(dirname "$out")"
  echo "// built" > "$out"
fi
if [ -n "$watch" ] && [ -n "$STUB_WATCH_EXIT" ]; then
  exit "$STUB_WATCH_EXIT"
fi
if [ -n "$watch" ]; then
  exec sleep 30
fi
exit 0
"#;

/// Doctype sources for `acme/doctype/widget/ts`
pub const WIDGET_SOURCES: &[(&str, &str)] = &[
    ("acme/doctype/widget/ts/form.ts", "frappe.ui.form.on('Widget', {});\n"),
    ("acme/doctype/widget/ts/list/view.ts", "export const view = 1;\n"),
    ("acme/doctype/widget/ts/types.d.ts", "declare const frappe: any;\n"),
];

/// Public asset sources for `acme/public/ts`
pub const ASSET_SOURCES: &[(&str, &str)] = &[
    ("acme/public/ts/main.ts", "console.log('main');\n"),
    ("acme/public/ts/util/helper.ts", "export const help = true;\n"),
];
