/*!

This is the long-form manual for `voter_search` and `voterlookup`.

## Input formats

The following formats are supported:
* `excel` Excel-family workbooks (`xlsx`, `xlsm`, `xlsb`, `xls`) and OpenDocument spreadsheets (`ods`)
* `csv` Comma Separated Values, as exported by most spreadsheet programs

When the type of the input is not given, it is guessed from the extension of the file: `.csv` files
are read as `csv`, everything else as `excel`.

### `excel`

The first row of the worksheet is the header. By default, the first worksheet of the workbook is used.
Another worksheet can be selected with `--excel-worksheet-name`.

Date cells are displayed as `2003-01-01`, or `2003-01-01 12:00:00` when they carry a time of day.

### `csv`

The first line is the header. Lines may have fewer fields than the header: the missing fields are empty.

## Searchable columns

Two columns of the header are searchable:
* the name of the voter (`FM_NAME_V2` by default, `--voter-column` to change it)
* the name of the father or husband (`RLN_FM_NM_V2` by default, `--relation-column` to change it)

Both columns must be present, or the file is rejected. A file with a header but no records has nothing
to search: `voterlookup` shows a warning and stops. The values of these columns are trimmed when
the file is loaded. All the other columns are displayed as they are.

## Searching

A search takes a voter name, a relation name, or both. A record matches if its voter name contains
the given voter name, ignoring case, and its relation name contains the given relation name. The
text is matched literally: `.`, `*` or `(` have no special meaning. Case is ignored by comparing
the upper case forms of both texts, so `straße` matches `STRASSE`. Tamil and other scripts without
case are compared as they are. Leading and trailing whitespace
of the search terms is ignored. At least one of the two names is required.

```bash
voterlookup -i old_data.xlsx --name ramu --relation murugesan
```

Without `--name` or `--relation`, `voterlookup` starts an interactive session that asks for both
names, runs the search, and asks again until the end of the input (`Ctrl-D`).

## Configuration file

All the settings can be stored in a JSON file, passed with `--config`:

```json
{
  "title": "123 Pollachi AC - Voter Details 2002",
  "source": {
    "provider": "excel",
    "filePath": "old_data.xlsx",
    "excelWorksheetName": "Sheet1"
  },
  "columns": {
    "voterName": "FM_NAME_V2",
    "relationName": "RLN_FM_NM_V2"
  }
}
```

The file path is relative to the directory of the configuration file. Options passed on the command
line take precedence over the configuration file. The `provider` only applies to the `filePath` of
the configuration: a file given with `--input` is read with `--input-type`, or with the type guessed
from its extension.

*/
