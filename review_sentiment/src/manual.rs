/*!

This is the long-form manual for `review_sentiment` and `revdash`.

## Input formats

Each application has its own files in the data directory. The name of the file is derived
from the lowercased name of the application:
* `{app}.csv` the basic dataset
* `{app}_with_versions.csv` the version-aware dataset

Both files may exist for the same application. They are treated as two separate datasets.

### `{app}.csv`

Comma Separated Values with a header row. The mandatory columns are:

| Month      | Positive | Neutral | Negative | Feature Title  |
|------------|----------|---------|----------|----------------|
| 2023-01-01 | 120      | 30      | 12       | Screen sharing |
| 2023-01-01 | 40       | 10      | 25       | Breakout rooms |

`Feature Description` and `Feature Type` are optional, except for the `detailed` view which
requires both of them.

Several rows may share the same month and the same feature. They are all kept for the area
chart and averaged in the feature table.

### `{app}_with_versions.csv`

The same columns, plus `Version` and `Feature Description` which are both mandatory.
The area chart is grouped by version instead of feature title, and the feature table can list
the features of one version.

### Headers and encoding

Headers are matched after removing a leading byte-order mark and the surrounding whitespace,
so `\u{feff}Month ` is read as `Month`. Files are read as UTF-8. If a file is not valid UTF-8,
it is decoded as Latin-1 instead, which never fails.

### Month

The month column accepts `2023-01-15`, `2023/01/15`, `01/15/2023`, `2023-01`, `Jan 2023`,
`January 2023` and ISO timestamps. The day is kept for display, but all the groupings are done
by calendar month. Months are labeled `January 2023` in the selectors.

### Counts

`Positive`, `Neutral` and `Negative` must be non-negative integers. Empty cells are read as 0.

## Rows without reviews

A row with `0` positive, neutral and negative reviews has no defined proportions. By default,
such rows are kept for the trend (where they count for zero) and for the monthly feature
averages, but they are left out of the area chart and the pie chart and reported in the
`degenerateRows` section of the output. With `--reject-degenerate`, the first such row stops
the processing instead.

Errors and the `degenerateRows` entries give the line of the file the row comes from, the
header being line 1. Counts whose total does not fit in 64 bits are reported as an error.

## Configuration

An optional JSON file, passed with `--config`:

```json
{
  "dataDirectory": "data",
  "defaultApplication": "zoom",
  "degenerateRows": "exclude",
  "applications": [
    { "name": "zoom", "label": "Zoom" },
    { "name": "webex", "label": "Webex", "versioned": true },
    { "name": "firefox" }
  ]
}
```

The `label` of an application is copied into the summary. The paths are relative to the
location of the configuration file. Command line flags take precedence over the
configuration.

*/
